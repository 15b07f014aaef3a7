//! Product concept: market research → analysis → design → review

use crate::workflow::{ConversableAgent, ConversationPhase, ConversationWorkflow};

pub const SLUG: &str = "product";

pub const DEFAULT_TOPIC: &str = "A personal finance assistant for freelancers";

pub fn workflow() -> ConversationWorkflow {
    let researcher = ConversableAgent::new(
        "MarketResearcher",
        "Market Research Analyst",
        "You size markets and map competitors. You describe target customer \
         segments, their pain points, and the products they use today.",
    );
    let analyst = ConversableAgent::new(
        "OpportunityAnalyst",
        "Product Strategy Analyst",
        "You turn market research into a sharp opportunity statement. You weigh \
         risks against differentiators and pick the segment worth serving first.",
    )
    .with_temperature(0.5);
    let designer = ConversableAgent::new(
        "ProductDesigner",
        "Product Designer",
        "You design the first version of a product: core user journeys, key \
         features ranked by priority, and what is deliberately left out.",
    );
    let reviewer = ConversableAgent::new(
        "ProductReviewer",
        "Skeptical Product Reviewer",
        "You stress-test product plans. You challenge assumptions, flag gaps \
         between the research and the design, and propose concrete fixes.",
    )
    .with_temperature(0.4);

    ConversationWorkflow {
        slug: SLUG.to_string(),
        title: "Product Concept".to_string(),
        subject_label: "Product idea".to_string(),
        default_topic: DEFAULT_TOPIC.to_string(),
        phases: vec![
            ConversationPhase::new(
                "market_research",
                "Research the market",
                researcher,
                "Describe the market for this product idea: 2-3 customer segments, \
                 their main pain points, and 3-5 existing competitors with their weaknesses.",
            ),
            ConversationPhase::new(
                "analysis",
                "Analyze the opportunity",
                analyst,
                "Based on the market research, choose the most promising segment. \
                 State the opportunity, the top 3 risks, and what would make this product stand out.",
            ),
            ConversationPhase::new(
                "design",
                "Design the first version",
                designer,
                "Design a first version for the chosen segment. List the core user \
                 journeys, a prioritized feature list (must/should/could), and success metrics.",
            ),
            ConversationPhase::new(
                "review",
                "Review and refine the design",
                reviewer,
                "Critically review the design against the research and analysis above. \
                 Point out weaknesses and missing pieces, then provide a refined final plan.",
            ),
        ],
    }
}
