//! Trip planning: flight → hotel → itinerary → budget

use crate::workflow::{Crew, CrewAgent, CrewTask};

pub const SLUG: &str = "travel";

pub const DEFAULT_DESTINATION: &str = "Lisbon, Portugal";

pub fn crew() -> Crew {
    let flights = CrewAgent::new(
        "Flight Specialist",
        "Find sensible flight options to {destination} for a 5-day trip.",
        "You have booked thousands of trips. You know which routes, layovers \
         and departure times keep travellers rested and costs reasonable.",
    );
    let hotels = CrewAgent::new(
        "Accommodation Scout",
        "Recommend places to stay in {destination} that fit the chosen flights.",
        "You know neighbourhoods well and match travellers with hotels close to \
         what they want to see, within a sensible budget.",
    );
    let planner = CrewAgent::new(
        "Itinerary Planner",
        "Build a realistic day-by-day itinerary for {destination}.",
        "You design trips that mix highlights with downtime, group nearby sights \
         together, and leave room for meals and travel between places.",
    );
    let accountant = CrewAgent::new(
        "Travel Budget Analyst",
        "Produce a complete budget for the trip and flag ways to save.",
        "You track every cost line of a trip and spot where money can be saved \
         without hurting the experience.",
    );

    let tasks = vec![
        CrewTask::new(
            "flight",
            &flights,
            "Propose 2-3 round-trip flight options to {destination} for a 5-day trip, \
             with airlines, typical departure times, number of stops, and approximate prices.",
            "A short comparison of flight options with a recommended choice.",
        ),
        CrewTask::new(
            "hotel",
            &hotels,
            "Based on the recommended flight's arrival and departure times, suggest \
             3 hotels in {destination} across price ranges, with neighbourhood, nightly \
             rate, and why each suits the trip.",
            "Three hotel options with nightly rates and a recommended pick.",
        ),
        CrewTask::new(
            "itinerary",
            &planner,
            "Build a 5-day itinerary starting from the recommended hotel. Include \
             morning, afternoon and evening plans, and account for arrival and \
             departure days.",
            "A day-by-day itinerary (Day 1 to Day 5) with activities and meal suggestions.",
        ),
        CrewTask::new(
            "budget",
            &accountant,
            "Total the costs of the recommended flight, hotel and itinerary, including \
             food, local transport and entry fees. Suggest concrete savings.",
            "A cost breakdown table with a grand total, followed by 3-5 saving tips.",
        ),
    ];

    Crew {
        slug: SLUG.to_string(),
        title: "Trip Plan".to_string(),
        input_key: "destination".to_string(),
        subject_label: "Destination".to_string(),
        default_input: DEFAULT_DESTINATION.to_string(),
        agents: vec![flights, hotels, planner, accountant],
        tasks,
    }
}
