//! Retrieval-augmented prompt assembly
//!
//! Retrieves catalog items relevant to a user's request and renders them as a
//! numbered context block ahead of the instruction for the generative model.

use decoplan_core::{
    AttributeFilter, CatalogItem, PromptAugmenter, Result, Retriever,
};
use serde_json::Value;
use std::fmt::Write;
use std::sync::Arc;
use tracing::debug;

const SYSTEM_PREAMBLE: &str =
    "You are an interior design assistant. Design the room using furniture from the catalog.";

const CLOSING_INSTRUCTION: &str =
    "Using the furniture items above, describe a cohesive room design that fulfils the request.";

/// [`PromptAugmenter`] backed by any [`Retriever`]
pub struct PromptBuilder {
    retriever: Arc<dyn Retriever>,
}

impl PromptBuilder {
    pub fn new(retriever: Arc<dyn Retriever>) -> Self {
        Self { retriever }
    }

    /// Items for the prompt, hint filters first and unfiltered as a fallback
    fn context_items(
        &self,
        user_prompt: &str,
        room_type: Option<&str>,
        style: Option<&str>,
        n_items: usize,
    ) -> Result<Vec<CatalogItem>> {
        let query = [style, room_type, Some(user_prompt)]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" ");

        let mut filter = AttributeFilter::default();
        if let Some(room_type) = room_type {
            filter = filter.with("room_type", Value::String(room_type.to_string()));
        }
        if let Some(style) = style {
            filter = filter.with("style", Value::String(style.to_string()));
        }

        if filter.is_empty() {
            return self.retriever.retrieve(&query, n_items, &filter);
        }

        let items = self.retriever.retrieve(&query, n_items, &filter)?;
        if !items.is_empty() {
            return Ok(items);
        }
        debug!(?room_type, ?style, "no items match the prompt hints, retrying unfiltered");
        self.retriever
            .retrieve(&query, n_items, &AttributeFilter::default())
    }
}

impl PromptAugmenter for PromptBuilder {
    fn create_prompt_with_context(
        &self,
        user_prompt: &str,
        room_type: Option<&str>,
        style: Option<&str>,
        n_items: usize,
    ) -> Result<String> {
        let items = if n_items == 0 {
            Vec::new()
        } else {
            self.context_items(user_prompt, room_type, style, n_items)?
        };
        Ok(render_prompt(user_prompt, room_type, style, &items))
    }
}

/// Render the augmented prompt text
pub fn render_prompt(
    user_prompt: &str,
    room_type: Option<&str>,
    style: Option<&str>,
    items: &[CatalogItem],
) -> String {
    let mut prompt = String::new();
    // Writing to a String cannot fail
    let _ = writeln!(prompt, "{}", SYSTEM_PREAMBLE);
    let _ = writeln!(prompt);
    let _ = writeln!(prompt, "User request: {}", user_prompt);
    if let Some(room_type) = room_type {
        let _ = writeln!(prompt, "Room type: {}", room_type);
    }
    if let Some(style) = style {
        let _ = writeln!(prompt, "Preferred style: {}", style);
    }
    let _ = writeln!(prompt);

    if items.is_empty() {
        let _ = writeln!(prompt, "No matching furniture was found in the catalog.");
    } else {
        let _ = writeln!(prompt, "Relevant furniture from the catalog:");
        for (i, item) in items.iter().enumerate() {
            let _ = write!(
                prompt,
                "{}. {} ({}, {} style)",
                i + 1,
                item.name,
                item.furniture_type,
                item.feel
            );
            if !item.description.is_empty() {
                let _ = write!(prompt, ": {}", item.description);
            }
            let details: Vec<String> = [
                ("material", &item.material),
                ("color", &item.color),
                ("dimensions", &item.dimensions),
            ]
            .into_iter()
            .filter_map(|(label, value)| value.as_ref().map(|v| format!("{}: {}", label, v)))
            .collect();
            if !details.is_empty() {
                let _ = write!(prompt, " [{}]", details.join(", "));
            }
            let _ = writeln!(prompt);
        }
    }

    let _ = writeln!(prompt);
    let _ = write!(prompt, "{}", CLOSING_INSTRUCTION);
    prompt
}
