// All LLM prompt constants for cover letter generation.

/// System prompt: sets the writer role and the reply format the parser relies on.
pub const COVER_LETTER_SYSTEM: &str = r#"You are a professional cover letter writer. Given a resume and job description, create a compelling, personalized cover letter that:
1. Highlights relevant experience from the resume
2. Addresses key requirements from the job posting
3. Shows enthusiasm for the role and company
4. Is professional yet engaging
5. Is 3-4 paragraphs long

Return only the cover letter text without any additional formatting or metadata.
Also extract the company name, job title, and job ID (if available) and return them in JSON format at the end.

Format your response as:
[COVER_LETTER_TEXT]

JSON_DATA:
{"company_name": "Company Name", "job_title": "Job Title", "job_id": "ID or null"}"#;

/// User prompt template. Replace `{resume}` and `{job_description}` before sending.
pub const COVER_LETTER_PROMPT_TEMPLATE: &str = r#"Resume:
{resume}

Job Description:
{job_description}

Create a personalized cover letter for this job application."#;

/// Embeds both inputs verbatim.
///
/// The job description is substituted last so placeholder text inside the
/// résumé is never expanded.
pub fn build_cover_letter_prompt(resume: &str, job_description: &str) -> String {
    let (head, tail) = COVER_LETTER_PROMPT_TEMPLATE
        .split_once("{job_description}")
        .unwrap_or((COVER_LETTER_PROMPT_TEMPLATE, ""));
    format!("{}{}{}", head.replace("{resume}", resume), job_description, tail)
}
