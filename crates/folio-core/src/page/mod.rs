//! Page model: sections and the flat element tree the controller and
//! effects operate on.

mod doc;

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

pub use doc::{ButtonDoc, CardDoc, PageDoc, SectionDoc, SectionLayout};

/// Stable handle to an element of a [`Page`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ElementId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    SectionHeader,
    ServiceCard,
    PortfolioCard,
    PortfolioImage,
    PortfolioOverlay,
    PortfolioActions,
    ContactCard,
    HeroBackground,
    HeroTitle,
    ScrollIndicator,
    Button,
    Link,
    Loader,
}

/// Element kinds observed for one-shot reveal animations
pub const REVEAL_KINDS: [ElementKind; 4] = [
    ElementKind::ServiceCard,
    ElementKind::PortfolioCard,
    ElementKind::ContactCard,
    ElementKind::SectionHeader,
];

impl ElementKind {
    /// Whether the element receives clicks and keyboard focus
    pub fn is_interactive(self) -> bool {
        matches!(
            self,
            ElementKind::Button | ElementKind::Link | ElementKind::ScrollIndicator
        )
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Element {
    pub id: ElementId,
    pub kind: ElementKind,
    /// Index into [`Page::sections`]
    pub section: usize,
    pub parent: Option<ElementId>,
    pub text: String,
    pub detail: String,
    pub href: Option<String>,
    /// Section id a button jumps to
    pub target: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Section {
    pub id: String,
    pub layout: SectionLayout,
    pub title: String,
    pub subtitle: Option<String>,
    /// First element of the section; jump-scroll aligns this to the top
    pub anchor: ElementId,
}

#[derive(Debug, Clone, Serialize)]
pub struct Page {
    pub title: String,
    sections: Vec<Section>,
    elements: Vec<Element>,
}

/// Flattens a [`PageDoc`] into elements, assigning ids in document order
struct PageBuilder {
    elements: Vec<Element>,
}

impl PageBuilder {
    fn push(
        &mut self,
        kind: ElementKind,
        section: usize,
        parent: Option<ElementId>,
        text: &str,
    ) -> ElementId {
        let id = ElementId(self.elements.len());
        self.elements.push(Element {
            id,
            kind,
            section,
            parent,
            text: text.to_string(),
            detail: String::new(),
            href: None,
            target: None,
        });
        id
    }

    fn push_button(
        &mut self,
        section: usize,
        parent: Option<ElementId>,
        button: &ButtonDoc,
    ) -> ElementId {
        let id = self.push(ElementKind::Button, section, parent, &button.label);
        let element = &mut self.elements[id.0];
        element.target = button.target.clone();
        element.href = button.href.clone();
        id
    }

    fn set_detail(&mut self, id: ElementId, detail: &str) {
        self.elements[id.0].detail = detail.to_string();
    }
}

impl Page {
    /// The default portfolio page
    pub fn builtin() -> Self {
        Self::from_doc(&PageDoc::builtin())
    }

    /// Parse and validate a TOML page description
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let doc: PageDoc =
            toml::from_str(content).map_err(|e| Error::PageParse(e.to_string()))?;
        validate(&doc)?;
        Ok(Self::from_doc(&doc))
    }

    /// Load a TOML page description from disk
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Build the element tree for a page description
    pub fn from_doc(doc: &PageDoc) -> Self {
        let mut builder = PageBuilder {
            elements: Vec::new(),
        };
        let mut sections = Vec::with_capacity(doc.sections.len());

        for (index, section) in doc.sections.iter().enumerate() {
            let anchor = match section.layout {
                SectionLayout::Hero => {
                    let anchor = builder.push(ElementKind::HeroBackground, index, None, "");
                    let title = builder.push(ElementKind::HeroTitle, index, None, &section.title);
                    if let Some(subtitle) = &section.subtitle {
                        builder.set_detail(title, subtitle);
                    }
                    for button in &section.buttons {
                        builder.push_button(index, None, button);
                    }
                    builder.push(ElementKind::ScrollIndicator, index, None, "Scroll");
                    anchor
                }
                layout => {
                    let header =
                        builder.push(ElementKind::SectionHeader, index, None, &section.title);
                    if let Some(subtitle) = &section.subtitle {
                        builder.set_detail(header, subtitle);
                    }
                    for card in &section.cards {
                        push_card(&mut builder, index, layout, card);
                    }
                    for button in &section.buttons {
                        builder.push_button(index, None, button);
                    }
                    header
                }
            };

            sections.push(Section {
                id: section.id.clone(),
                layout: section.layout,
                title: section.title.clone(),
                subtitle: section.subtitle.clone(),
                anchor,
            });
        }

        if doc.loader {
            builder.push(ElementKind::Loader, 0, None, "Loading");
        }

        Self {
            title: doc.title.clone(),
            sections,
            elements: builder.elements,
        }
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(id.0)
    }

    /// Look up a section by its stable identifier
    pub fn section(&self, id: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.id == id)
    }

    /// Element that jump-scroll aligns with the viewport top
    pub fn section_anchor(&self, id: &str) -> Option<ElementId> {
        self.section(id).map(|s| s.anchor)
    }

    pub fn by_kind(&self, kind: ElementKind) -> impl Iterator<Item = &Element> + '_ {
        self.elements.iter().filter(move |e| e.kind == kind)
    }

    pub fn first_of_kind(&self, kind: ElementKind) -> Option<ElementId> {
        self.by_kind(kind).next().map(|e| e.id)
    }

    /// All elements matching any of `kinds`, in document order
    pub fn select(&self, kinds: &[ElementKind]) -> Vec<ElementId> {
        self.elements
            .iter()
            .filter(|e| kinds.contains(&e.kind))
            .map(|e| e.id)
            .collect()
    }

    /// First direct child of `parent` with the given kind
    pub fn child_of_kind(&self, parent: ElementId, kind: ElementKind) -> Option<ElementId> {
        self.elements
            .iter()
            .find(|e| e.parent == Some(parent) && e.kind == kind)
            .map(|e| e.id)
    }

    pub fn children(&self, parent: ElementId) -> impl Iterator<Item = &Element> + '_ {
        self.elements
            .iter()
            .filter(move |e| e.parent == Some(parent))
    }

    /// Nearest ancestor (or the element itself) of the given kind
    pub fn ancestor_of_kind(&self, id: ElementId, kind: ElementKind) -> Option<ElementId> {
        let mut current = self.element(id);
        while let Some(element) = current {
            if element.kind == kind {
                return Some(element.id);
            }
            current = element.parent.and_then(|p| self.element(p));
        }
        None
    }

    /// Focusable elements in document order
    pub fn interactive(&self) -> Vec<ElementId> {
        self.elements
            .iter()
            .filter(|e| e.kind.is_interactive())
            .map(|e| e.id)
            .collect()
    }
}

fn push_card(builder: &mut PageBuilder, section: usize, layout: SectionLayout, card: &CardDoc) {
    match layout {
        SectionLayout::Portfolio => {
            let id = builder.push(ElementKind::PortfolioCard, section, None, &card.title);
            builder.set_detail(id, &card.body);
            builder.push(ElementKind::PortfolioImage, section, Some(id), &card.title);
            builder.push(ElementKind::PortfolioOverlay, section, Some(id), &card.body);
            let actions = builder.push(ElementKind::PortfolioActions, section, Some(id), "");
            for button in &card.actions {
                builder.push_button(section, Some(actions), button);
            }
        }
        SectionLayout::Contact => {
            let id = builder.push(ElementKind::ContactCard, section, None, &card.title);
            builder.set_detail(id, &card.body);
            if let Some(href) = &card.href {
                let link_text = href.strip_prefix("mailto:").unwrap_or(href);
                let link = builder.push(ElementKind::Link, section, Some(id), link_text);
                builder.elements[link.0].href = Some(href.clone());
            }
        }
        SectionLayout::Services | SectionLayout::Hero => {
            let id = builder.push(ElementKind::ServiceCard, section, None, &card.title);
            builder.set_detail(id, &card.body);
        }
    }
}

fn validate(doc: &PageDoc) -> Result<()> {
    let mut seen = HashSet::new();
    for section in &doc.sections {
        if section.id.trim().is_empty() {
            return Err(Error::PageParse("section id must not be empty".to_string()));
        }
        if !seen.insert(section.id.as_str()) {
            return Err(Error::PageParse(format!(
                "duplicate section id '{}'",
                section.id
            )));
        }
    }

    let targets = doc
        .sections
        .iter()
        .flat_map(|s| {
            s.buttons
                .iter()
                .chain(s.cards.iter().flat_map(|c| c.actions.iter()))
        })
        .filter_map(|b| b.target.as_deref());
    for target in targets {
        if !seen.contains(target) {
            return Err(Error::UnknownSection(target.to_string()));
        }
    }

    Ok(())
}
