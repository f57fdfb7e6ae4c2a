//! Prompt templates for the answering model and the judge.
//!
//! The answering model gets one of three system prompts depending on the
//! experiment mode (see [`crate::mode`]). The judge always gets a single
//! user message built by [`judge_prompt`].

/// Baseline: answer and translate, no format constraint.
pub const BASELINE_SYSTEM_PROMPT: &str = "You are a helpful AI assistant. Answer the user's \
question, then translate it to Vietnamese.";

/// Prompt-tuned: strict two-section format with a worked example.
pub const PROMPT_TUNED_SYSTEM_PROMPT: &str = r#"You are a hyper-precise bilingual expert. You will strictly follow a two-part format. First, provide a complete, factual answer in English inside <english_answer> XML tags. Second, provide a direct and accurate translation of that English answer into Vietnamese inside <vietnamese_translation> XML tags. Do not add any other commentary. Here is an example of the required format:

EXAMPLE QUESTION: What is a CPU?
EXAMPLE RESPONSE:
<english_answer>
A CPU, or Central Processing Unit, is the primary component of a computer that executes instructions.
</english_answer>
<vietnamese_translation>
CPU, hay Bộ xử lý trung tâm, là thành phần chính của máy tính thực hiện các lệnh.
</vietnamese_translation>"#;

/// Rag-assisted: same format, answer only from the supplied context.
pub const RAG_ASSISTED_SYSTEM_PROMPT: &str = "You are a hyper-precise bilingual expert. Use ONLY \
the provided context to answer the question. Strictly follow the two-part format: first, the \
English answer in <english_answer> tags. Second, the Vietnamese translation in \
<vietnamese_translation> tags.";

/// Instructions placed ahead of the question/answer block sent to the judge.
pub const JUDGE_INSTRUCTIONS: &str = "You are a meticulous fact-checker. Compare the 'Model \
Answer' to the 'Ground Truth Answer'. A hallucination is a significant factual error, \
contradiction, or failure to follow the translation instruction in EITHER the English or \
Vietnamese part. Respond with ONLY 'YES' if it's a hallucination or 'NO' if it is factually \
consistent and correctly formatted/translated.";

/// Wrap a question with a retrieval context block.
pub fn with_context(context: &str, question: &str) -> String {
    format!("CONTEXT:\n---\n{context}\n---\n\nQUESTION: {question}")
}

/// Build the fact-checking prompt for the judge model.
pub fn judge_prompt(question: &str, ground_truth: &str, model_answer: &str) -> String {
    format!(
        "{JUDGE_INSTRUCTIONS}\n\n\
         Question: \"{question}\"\n\n\
         Ground Truth Answer: \"{ground_truth}\"\n\n\
         Model Answer: \"{model_answer}\""
    )
}
