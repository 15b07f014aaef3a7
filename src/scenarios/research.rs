//! Research paper outline: literature → gaps → outline → review

use crate::workflow::{ConversableAgent, ConversationPhase, ConversationWorkflow};

pub const SLUG: &str = "research";

pub const DEFAULT_TOPIC: &str = "How multi-agent AI systems can support human decision-making";

pub fn workflow() -> ConversationWorkflow {
    let literature = ConversableAgent::new(
        "LiteratureReviewer",
        "Literature Review Specialist",
        "You conduct a concise but insightful literature review. \
         You summarize key themes, representative papers, and open questions, \
         highlighting where the field currently stands.",
    );
    let gaps = ConversableAgent::new(
        "GapAnalyst",
        "Research Gap Analyst",
        "You read the literature summary and identify gaps, tensions, and \
         promising research directions. You propose 2-3 concrete research \
         questions or hypotheses that a new paper could address.",
    );
    let outline = ConversableAgent::new(
        "OutlineDesigner",
        "Research Paper Outline Designer",
        "You turn a research idea into a well-structured paper outline. \
         You define sections (e.g., Introduction, Related Work, Method, \
         Experiments, Discussion, Conclusion) and list bullet points for \
         what each section should cover.",
    );
    let review = ConversableAgent::new(
        "OutlineReviewer",
        "Critical Research Mentor",
        "You critically review the proposed outline, checking for coherence, \
         feasibility, and novelty. You suggest improvements and highlight \
         any missing sections or clarifications needed.",
    );

    ConversationWorkflow {
        slug: SLUG.to_string(),
        title: "Research Paper Outline".to_string(),
        subject_label: "Paper topic".to_string(),
        default_topic: DEFAULT_TOPIC.to_string(),
        phases: vec![
            ConversationPhase::new(
                "literature",
                "Literature review on the topic",
                literature,
                "Write a concise literature review for this topic. \
                 Mention 3-5 key themes or directions and typical methods used.",
            ),
            ConversationPhase::new(
                "gaps",
                "Analyze research gaps and propose questions",
                gaps,
                "Based on the literature review, identify gaps or open problems. \
                 Propose 2-3 concrete research questions or hypotheses that a new paper could address.",
            ),
            ConversationPhase::new(
                "outline",
                "Design structured paper outline",
                outline,
                "Design a detailed outline for a full research paper on this topic, \
                 grounded in the research questions above. Use standard sections \
                 (Introduction, Related Work, Method, Experiments, Results/Discussion, Conclusion) \
                 with bullet points under each.",
            ),
            ConversationPhase::new(
                "review",
                "Critically review and refine the outline",
                review,
                "Critically review the proposed outline. Point out strengths, weaknesses, \
                 and any missing parts. Then provide an improved, final outline.",
            ),
        ],
    }
}
