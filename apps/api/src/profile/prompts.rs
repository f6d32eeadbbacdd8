/// Resume extraction prompt template. Replace `{resume_text}` before sending.
pub const RESUME_PARSE_PROMPT_TEMPLATE: &str = r#"Extract personal information from this resume text.

Return a JSON object with this EXACT schema, every value a plain string:
{
  "full_name": "...",
  "skills": "skill1, skill2",
  "experience": "...",
  "education": "...",
  "summary": "..."
}

Use an empty string for anything the resume does not state.

Resume Text:
{resume_text}
"#;
