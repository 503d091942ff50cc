//! Declarative page description (TOML) and the built-in portfolio content.

use serde::{Deserialize, Serialize};

/// Top-level page description
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageDoc {
    pub title: String,
    /// Show a loader overlay until the page reports it has loaded
    #[serde(default)]
    pub loader: bool,
    pub sections: Vec<SectionDoc>,
}

/// How a section is laid out and which element kinds its cards become
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionLayout {
    Hero,
    #[default]
    Services,
    Portfolio,
    Contact,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionDoc {
    /// Stable identifier used by jump-scroll ("hero", "services", ...)
    pub id: String,
    #[serde(default)]
    pub layout: SectionLayout,
    pub title: String,
    #[serde(default)]
    pub subtitle: Option<String>,
    #[serde(default)]
    pub cards: Vec<CardDoc>,
    /// Hero call-to-action buttons
    #[serde(default)]
    pub buttons: Vec<ButtonDoc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardDoc {
    pub title: String,
    #[serde(default)]
    pub body: String,
    /// Contact cards render this as their link
    #[serde(default)]
    pub href: Option<String>,
    /// Portfolio action buttons
    #[serde(default)]
    pub actions: Vec<ButtonDoc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ButtonDoc {
    pub label: String,
    /// Section id to jump to when clicked
    #[serde(default)]
    pub target: Option<String>,
    #[serde(default)]
    pub href: Option<String>,
}

impl ButtonDoc {
    fn jump(label: &str, target: &str) -> Self {
        Self {
            label: label.to_string(),
            target: Some(target.to_string()),
            href: None,
        }
    }

    fn plain(label: &str) -> Self {
        Self {
            label: label.to_string(),
            target: None,
            href: None,
        }
    }
}

fn card(title: &str, body: &str) -> CardDoc {
    CardDoc {
        title: title.to_string(),
        body: body.to_string(),
        href: None,
        actions: Vec::new(),
    }
}

fn portfolio_card(title: &str, body: &str) -> CardDoc {
    CardDoc {
        actions: vec![ButtonDoc::plain("View"), ButtonDoc::plain("Details")],
        ..card(title, body)
    }
}

fn contact_card(title: &str, body: &str, href: &str) -> CardDoc {
    CardDoc {
        href: Some(href.to_string()),
        ..card(title, body)
    }
}

impl PageDoc {
    /// The default portfolio shipped with the binary
    pub fn builtin() -> Self {
        Self {
            title: "Studio Folio".to_string(),
            loader: true,
            sections: vec![
                SectionDoc {
                    id: "hero".to_string(),
                    layout: SectionLayout::Hero,
                    title: "Visual stories, crafted frame by frame".to_string(),
                    subtitle: Some("Photography, motion and brand design".to_string()),
                    cards: Vec::new(),
                    buttons: vec![
                        ButtonDoc::jump("See the work", "portfolio"),
                        ButtonDoc::jump("Get in touch", "contact"),
                    ],
                },
                SectionDoc {
                    id: "services".to_string(),
                    layout: SectionLayout::Services,
                    title: "Services".to_string(),
                    subtitle: Some("What we can make together".to_string()),
                    cards: vec![
                        card("Photography", "Editorial, product and portrait shoots."),
                        card("Motion", "Short-form video and animated identities."),
                        card("Brand design", "Logos, type systems and guidelines."),
                    ],
                    buttons: Vec::new(),
                },
                SectionDoc {
                    id: "portfolio".to_string(),
                    layout: SectionLayout::Portfolio,
                    title: "Portfolio".to_string(),
                    subtitle: Some("Selected projects".to_string()),
                    cards: vec![
                        portfolio_card("Northern Light", "Landscape series, 2024"),
                        portfolio_card("Salt & Stone", "Restaurant identity"),
                        portfolio_card("Night Market", "Street documentary"),
                        portfolio_card("Paper Birds", "Stop-motion short"),
                    ],
                    buttons: Vec::new(),
                },
                SectionDoc {
                    id: "contact".to_string(),
                    layout: SectionLayout::Contact,
                    title: "Contact".to_string(),
                    subtitle: Some("Let's start a project".to_string()),
                    cards: vec![
                        contact_card(
                            "Email",
                            "Replies within two working days.",
                            "mailto:hello@studiofolio.example",
                        ),
                        contact_card(
                            "Instagram",
                            "Daily work in progress.",
                            "https://www.instagram.com/studiofolio",
                        ),
                    ],
                    buttons: Vec::new(),
                },
            ],
        }
    }
}
