//! Context assembly from retrieved documents

use crate::cli::output::truncate_str;
use crate::models::ProductDetails;
use crate::models::ScoredResult;
use crate::rag::policy::PolicyChunk;

/// Longest product description copied into the context
const MAX_DESCRIPTION_CHARS: usize = 400;

/// Assembler for creating prompt context from search results
pub struct ContextAssembler {
    max_context_length: usize,
}

impl ContextAssembler {
    /// Create a new context assembler with a character budget
    #[must_use]
    pub const fn new(max_context_length: usize) -> Self {
        Self { max_context_length }
    }

    /// Render products as numbered blocks, stopping before the budget is exceeded
    #[must_use]
    pub fn assemble(&self, results: &[ScoredResult]) -> String {
        let mut context = String::new();
        let mut total_length = 0;

        for (idx, result) in results.iter().enumerate() {
            let entry = format!("\n[Product {}]\n{}\n", idx + 1, self.format_product(result));
            let length = entry.chars().count();

            if total_length + length > self.max_context_length {
                break;
            }

            context.push_str(&entry);
            total_length += length;
        }

        context
    }

    /// Join policy passages, one per line, within the budget
    #[must_use]
    pub fn assemble_policy(&self, chunks: &[PolicyChunk]) -> String {
        let mut context = String::new();
        let mut total_length = 0;

        for chunk in chunks {
            let length = chunk.text.chars().count() + usize::from(!context.is_empty());
            if total_length + length > self.max_context_length {
                break;
            }
            if !context.is_empty() {
                context.push('\n');
            }
            context.push_str(&chunk.text);
            total_length += length;
        }

        context
    }

    /// Format a single product for context
    fn format_product(&self, result: &ScoredResult) -> String {
        let details = ProductDetails::from_record(&result.record);
        let mut parts = vec![format!("Name: {}", details.name)];

        if !details.price.is_empty() {
            parts.push(format!("Price: {}", details.price));
        }
        if !details.description.is_empty() {
            parts.push(format!(
                "Description: {}",
                truncate_str(&details.description, MAX_DESCRIPTION_CHARS)
            ));
        }
        if !details.image_url.is_empty() {
            parts.push(format!("Image: {}", details.image_url));
        }
        if !details.url.is_empty() {
            parts.push(format!("URL: {}", details.url));
        }

        parts.join("\n")
    }
}

impl Default for ContextAssembler {
    fn default() -> Self {
        Self::new(8000)
    }
}
