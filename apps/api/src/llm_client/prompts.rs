// All LLM prompt constants. Each template documents its placeholders;
// callers fill them with `str::replace` before sending.

/// System prompt for resume analysis — enforces JSON-only output.
pub const ANALYSIS_SYSTEM: &str =
    "You are an expert resume writer and career coach evaluating resumes \
    for ATS compatibility and overall quality. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences.";

/// Analysis prompt template. Replace `{resume_text}`, `{job_context}`,
/// and `{heuristic_score}` before sending.
pub const ANALYSIS_PROMPT_TEMPLATE: &str = r#"Analyze the following resume and return a JSON object with this EXACT schema (no extra fields):
{
  "ats_score": 72,
  "strengths": ["Strong use of quantifiable achievements"],
  "weaknesses": ["Missing professional summary"],
  "suggestions": ["Add a 2-3 sentence professional summary at the top"]
}

Rules:
- "ats_score" is an integer from 0 to 100 measuring ATS compatibility.
- A rule-based pre-scan rated this resume {heuristic_score}/100; adjust from
  there only where the text justifies it.
- Each list holds short, specific, actionable sentences (max 6 per list).
{job_context}
RESUME TEXT:
{resume_text}"#;

/// System prompt for job-gap commentary.
pub const GAP_COMMENTARY_SYSTEM: &str =
    "You are a career advisor comparing a resume against a job description. \
    Be direct about gaps and concrete about how to close them.";

/// Gap commentary prompt template. Replace `{resume_text}`,
/// `{job_description}`, `{matching_skills}` and `{missing_skills}`.
pub const GAP_COMMENTARY_PROMPT_TEMPLATE: &str = r#"Compare this resume against the job description and write 2-4 sentences of gap commentary: where the candidate falls short of the role and what would most improve their fit.

Job Description:
{job_description}

Resume Text:
{resume_text}

Skills already matching: {matching_skills}
Skills missing from the resume: {missing_skills}

Gap commentary:"#;

/// System prompt for cover-letter writing.
pub const COVER_LETTER_SYSTEM: &str =
    "You are an expert cover letter writer. Write compelling, specific \
    letters grounded in the candidate's actual experience.";

/// Cover letter prompt template. Replace `{tone_guidance}`,
/// `{length_guidance}`, `{job_description}`, `{candidate}` and
/// `{company_line}`.
pub const COVER_LETTER_PROMPT_TEMPLATE: &str = r#"Write a cover letter for the following position.

{length_guidance}
{tone_guidance}

Job Description:
{job_description}

Candidate Information:
{candidate}
{company_line}
Write a compelling cover letter that:
1. Addresses the hiring manager (use "Dear Hiring Manager" if no company name is given)
2. Expresses genuine interest in the position
3. Highlights relevant experience and skills from the resume
4. Explains why the candidate is a good fit
5. Includes a strong closing statement

Cover Letter:"#;

/// System prompt for interview question generation — enforces JSON output.
pub const INTERVIEW_QUESTIONS_SYSTEM: &str =
    "You are an experienced interviewer preparing candidates. \
    You MUST respond with valid JSON only: an object whose keys are the \
    question categories and whose values are arrays of question strings. \
    Do NOT use markdown code fences.";

/// Interview questions prompt template. Replace `{job_description}`,
/// `{candidate}` and `{categories}`.
pub const INTERVIEW_QUESTIONS_PROMPT_TEMPLATE: &str = r#"Generate interview questions for the following candidate and position.

Job Description:
{job_description}

Candidate Summary:
{candidate}

Generate these categories of questions: {categories}

For each category, provide 3-5 relevant questions. Return JSON with the
categories as keys and arrays of question strings as values."#;

/// System prompt for interview answer suggestions.
pub const INTERVIEW_ANSWER_SYSTEM: &str =
    "You are an interview coach. Suggest honest, structured answers that \
    draw on the candidate's real experience.";

/// Interview answer prompt template. Replace `{question}`, `{candidate}`
/// and `{job_context}`.
pub const INTERVIEW_ANSWER_PROMPT_TEMPLATE: &str = r#"Provide a suggested answer for this interview question based on the candidate's resume.

Question: {question}

{candidate}
{job_context}
Provide:
1. A suggested answer (2-3 paragraphs)
2. Key points to mention
3. Tips for answering"#;
