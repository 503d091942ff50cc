//! Click routing: what a click on an interactive element means, separate
//! from the pressed affordance every button shows.

use url::Url;

use crate::page::{ElementId, ElementKind, Page};

/// Section the scroll indicator jumps to
pub const INDICATOR_TARGET: &str = "services";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind {
    Email,
    Instagram,
    Web,
}

impl LinkKind {
    pub fn classify(href: &str) -> Self {
        match Url::parse(href) {
            Ok(url) if url.scheme() == "mailto" => LinkKind::Email,
            Ok(url) if url.host_str().is_some_and(|h| h.contains("instagram.com")) => {
                LinkKind::Instagram
            }
            Ok(_) => LinkKind::Web,
            Err(_) if href.contains("instagram.com") => LinkKind::Instagram,
            Err(_) => LinkKind::Web,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickAction {
    /// Smooth-scroll to a section
    JumpTo(String),
    /// Portfolio action button; navigation is suppressed
    PortfolioItem { label: String },
    FollowLink { href: String, kind: LinkKind },
    None,
}

pub fn route_click(page: &Page, element: ElementId) -> ClickAction {
    let Some(el) = page.element(element) else {
        return ClickAction::None;
    };

    match el.kind {
        ElementKind::ScrollIndicator => ClickAction::JumpTo(INDICATOR_TARGET.to_string()),
        ElementKind::Button
            if page
                .ancestor_of_kind(element, ElementKind::PortfolioActions)
                .is_some() =>
        {
            ClickAction::PortfolioItem {
                label: el.text.trim().to_string(),
            }
        }
        ElementKind::Button | ElementKind::Link => {
            if let Some(target) = &el.target {
                ClickAction::JumpTo(target.clone())
            } else if let Some(href) = &el.href {
                ClickAction::FollowLink {
                    href: href.clone(),
                    kind: LinkKind::classify(href),
                }
            } else {
                ClickAction::None
            }
        }
        _ => ClickAction::None,
    }
}
