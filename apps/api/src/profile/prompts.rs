//! Prompts for the LLM profile normalizer.

pub const PROFILE_ENRICH_SYSTEM: &str = "You are a resume normalization engine. \
You extract structured facts from resume text. You never invent facts that are \
not present in the text. You reply with a single JSON object and nothing else.";

pub const PROFILE_ENRICH_PROMPT: &str = r#"Extract the following from the resume text below.

Return JSON with exactly these keys:
{
  "contact": {"full_name": "", "email": "", "phone": "", "location": "", "linkedin": ""},
  "summary": {"headline": "", "overview": ""},
  "experience": [{"company": "", "title": "", "summary": "", "bullets": [""]}],
  "education": [{"school": "", "degree": ""}]
}

Rules:
- Use empty strings for anything the resume does not state.
- "overview" is a 1-2 sentence synthesis of the candidate's background.
- Keep bullets verbatim from the resume; do not rewrite them.

Resume text:
{resume_text}
"#;
