//! 3-day conference agenda: program → tracks → schedule → logistics

use crate::workflow::{Crew, CrewAgent, CrewTask};

pub const SLUG: &str = "conference";

pub const DEFAULT_THEME: &str = "AI in Education";

pub fn crew() -> Crew {
    let program_chair = CrewAgent::new(
        "Program Chair",
        "Define clear goals, target audience, and high-level tracks for a \
         3-day conference on '{conference_theme}'.",
        "You have chaired multiple academic and industry conferences. \
         You are skilled at clarifying who the conference is for, what \
         its objectives are, and how to structure tracks that align with \
         those goals.",
    );
    let track_designer = CrewAgent::new(
        "Track & Session Designer",
        "Design coherent session themes and talk ideas that fit the tracks \
         for a 3-day '{conference_theme}' conference.",
        "You specialize in turning broad tracks into concrete sessions. \
         You ensure each session has a clear focus, a mix of perspectives, \
         and a logical flow for attendees.",
    );
    let schedule_planner = CrewAgent::new(
        "Schedule Planner",
        "Arrange sessions into a practical 3-day timetable, balancing keynotes, \
         talks, breaks, and networking slots.",
        "You are experienced in agenda planning. You avoid overloading any day, \
         make sure breaks are reasonable, and space popular sessions to avoid conflicts.",
    );
    let logistics = CrewAgent::new(
        "Logistics & Risk Reviewer",
        "Review the proposed agenda for conflicts and logistical issues, and \
         suggest improvements.",
        "You think like an operations manager. You spot problems such as \
         double-booked rooms, back-to-back intense sessions, or accessibility \
         issues, and propose practical fixes.",
    );

    let tasks = vec![
        CrewTask::new(
            "program",
            &program_chair,
            "Define the high-level structure of a 3-day conference on '{conference_theme}'. \
             Clarify the primary audience, main goals, and propose 3-4 tracks \
             (e.g., technical, applications, ethics, workshops).",
            "A short document with: (1) conference goals, (2) target audience, \
             (3) 3-4 named tracks with 1-2 sentences describing each.",
        ),
        CrewTask::new(
            "tracks",
            &track_designer,
            "Based on the defined tracks and goals, design 6-8 sessions per day \
             for a 3-day conference. For each session, provide a title, 2-3 bullet \
             points on content, and which track it belongs to.",
            "A list of proposed sessions grouped by track, with titles and brief descriptions.",
        ),
        CrewTask::new(
            "schedule",
            &schedule_planner,
            "Convert the proposed sessions into a concrete 3-day agenda. \
             Assume each day runs roughly 9:00-17:30 with a keynote, \
             two morning sessions, lunch, two afternoon sessions, and an optional \
             evening event. Assign sessions to time slots and mention where parallel \
             tracks exist.",
            "A day-by-day agenda (Day 1, Day 2, Day 3) with time slots, session titles, \
             and indications of parallel tracks when applicable.",
        ),
        CrewTask::new(
            "logistics",
            &logistics,
            "Review the 3-day agenda for issues such as too many parallel sessions, \
             insufficient breaks, or clustering similar content. Suggest concrete \
             improvements and provide a final, adjusted agenda.",
            "A short critique of the agenda highlighting problems, followed by \
             an improved agenda layout.",
        ),
    ];

    Crew {
        slug: SLUG.to_string(),
        title: "3-Day Conference Agenda".to_string(),
        input_key: "conference_theme".to_string(),
        subject_label: "Conference theme".to_string(),
        default_input: DEFAULT_THEME.to_string(),
        agents: vec![program_chair, track_designer, schedule_planner, logistics],
        tasks,
    }
}
