//! Resume Analysis Orchestrator — composes the prompt catalog and the LLM
//! client into the extract → template → complete → return pipeline.

use std::collections::HashMap;

use crate::errors::AppError;
use crate::llm_client::{GroqClient, DEFAULT_MAX_TOKENS, DEFAULT_MODEL};
use crate::prompts::PromptCatalog;

/// Output-token ceiling for resume-specific analysis calls.
pub const RESUME_MAX_TOKENS: u32 = 1500;

const RESUME_ANALYSIS_KEY: &str = "resume_analysis";
const SUMMARY_KEY: &str = "summary";

/// Stateless given its constructed dependencies; safe to share across
/// concurrent requests.
#[derive(Debug, Clone)]
pub struct ResumeAnalyzer {
    catalog: PromptCatalog,
    llm: GroqClient,
}

impl ResumeAnalyzer {
    pub fn new(catalog: PromptCatalog, llm: GroqClient) -> Self {
        Self { catalog, llm }
    }

    /// Critiques resume text against a target role, experience level and
    /// industry domain. Catalog and client errors propagate unchanged.
    pub async fn analyze_resume(
        &self,
        text: &str,
        designation: &str,
        experience: &str,
        domain: &str,
    ) -> Result<String, AppError> {
        let params = HashMap::from([
            ("designation", designation),
            ("experience", experience),
            ("domain", domain),
        ]);
        let prompt = self.catalog.resolve(RESUME_ANALYSIS_KEY, &params)?;
        let result = self
            .llm
            .complete(&prompt, text, DEFAULT_MODEL, RESUME_MAX_TOKENS)
            .await?;
        Ok(result)
    }

    /// Context-free summary of resume text, at the generic token ceiling.
    pub async fn summarize(&self, text: &str) -> Result<String, AppError> {
        let prompt = self.catalog.resolve(SUMMARY_KEY, &HashMap::new())?;
        let result = self
            .llm
            .complete(&prompt, text, DEFAULT_MODEL, DEFAULT_MAX_TOKENS)
            .await?;
        Ok(result)
    }
}
