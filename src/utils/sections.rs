use once_cell::sync::Lazy;
use std::collections::HashMap;

// Persona shared by every outbound prompt.
pub const SYSTEM_PROMPT: &str = "\
You are an AI assistant for a company called FutureLabs AI that specializes in cutting-edge AI solutions.
Your responses should be helpful, concise, and maintain a professional but friendly tone.
Emphasize the futuristic nature of the company's technology.

Key information about FutureLabs AI:
- Offers AI-powered automation, security, and analytics solutions
- Features include neural integration, predictive analytics, and enterprise security
- Targets businesses looking to transform their operations with AI
- Has a modern, clean, minimalist aesthetic with dark-mode interface";

pub struct Section {
    pub id: &'static str,
    pub context: &'static str,
    pub default_welcome: &'static str,
}

// Landing page sections the assistant widget can be anchored to. The first
// entry doubles as the fallback for unknown section ids.
pub static SECTIONS: &[Section] = &[
    Section {
        id: "hero",
        context: "Focus on introducing the company vision and mission. Mention how FutureLabs AI is revolutionizing business operations.",
        default_welcome: "Welcome! I can help you learn about how FutureLabs AI is revolutionizing business operations. What would you like to know about our platform?",
    },
    Section {
        id: "features",
        context: "Provide details about specific features like Smart Automation, Advanced Security, and Predictive Analysis. Be ready to explain technical aspects.",
        default_welcome: "Looking for specific features? I can help you find the right solutions for your use case.",
    },
    Section {
        id: "ai-demo",
        context: "Help users understand how to interact with the AI demo. Suggest example questions they can ask.",
        default_welcome: "Try different prompts with our AI demo! I can show you how to get the most out of our technology.",
    },
    Section {
        id: "testimonials",
        context: "Discuss customer success stories and satisfaction rates. Mention industries that have benefited most from our solutions.",
        default_welcome: "Want to hear more success stories? I can share case studies and ROI data for your specific industry.",
    },
    Section {
        id: "contact",
        context: "Assist with contact form questions, demo scheduling, and general inquiries about getting started.",
        default_welcome: "Need quick assistance? I can help you schedule a demo or answer questions about our services.",
    },
];

static SECTIONS_BY_ID: Lazy<HashMap<&'static str, &'static Section>> =
    Lazy::new(|| SECTIONS.iter().map(|s| (s.id, s)).collect());

/// Look up a section by id. Unknown ids (including the generic "general"
/// context the chat widget sends outside any section) fall back to "hero"
/// rather than erroring.
pub fn resolve(section_id: &str) -> &'static Section {
    SECTIONS_BY_ID
        .get(section_id)
        .copied()
        .unwrap_or(&SECTIONS[0])
}

/// One system prompt, one section context, one user message, in that order.
pub fn build_chat_prompt(section: &Section, user_message: &str) -> String {
    format!(
        "{}\n\n{}\n\nUser message: {}",
        SYSTEM_PROMPT, section.context, user_message
    )
}

/// Instruction prompt for generating a section welcome message. Takes the raw
/// section id so the model sees whatever the page asked for.
pub fn build_welcome_prompt(section_id: &str) -> String {
    format!(
        "{}\n\nCreate a short, friendly welcome message (40-60 words) for an AI assistant widget on the \"{}\" section of the FutureLabs AI website. The message should offer help relevant to this section.",
        SYSTEM_PROMPT, section_id
    )
}
