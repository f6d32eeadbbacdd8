/// System prompt for recommendation generation.
pub const RECOMMENDATION_SYSTEM: &str =
    "You are a career advisor for students and early-career engineers. \
    Suggest courses and jobs that fit the candidate's current skills and goals. \
    You MUST respond with a single valid JSON object only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences.";

/// Recommendation prompt template. Replace the `{...}` placeholders before sending.
pub const RECOMMENDATION_PROMPT_TEMPLATE: &str = r#"Based on the following user profile, suggest 5 relevant courses and 5 relevant jobs.

Return a JSON object with this EXACT schema:
{
  "courses": [
    {"title": "...", "platform": "...", "link": "https://...", "tags": "tag1, tag2"}
  ],
  "jobs": [
    {"title": "...", "company": "...", "location": "...", "description": "...",
     "required_skills": "skill1, skill2", "link": "https://..."}
  ]
}

Both lists must be non-empty.

Profile:
Full Name: {full_name}
Skills: {skills}
Experience: {experience}
Education: {education}
Summary: {summary}
"#;
