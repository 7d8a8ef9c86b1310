use super::request::GenerateRequest;

/// Prompt asking the model for a JSON array of spoken-friendly questions
pub fn build_prompt(req: &GenerateRequest) -> String {
    format!(
        "Prepare questions for a job interview.
The job role is {role}.
The job experience level is {level}.
The tech stack used in the job is: {techstack}.
The focus between behavioural and technical questions should lean towards: {focus}.
The amount of questions required is: {amount}.
Please return only the questions, without any additional text.
The questions are going to be read by a voice assistant so do not use \"/\" or \"*\" or any other special characters which might break the voice assistant.
Return the questions formatted like this:
[\"Question 1\", \"Question 2\", \"Question 3\"]
",
        role = req.role,
        level = req.level,
        techstack = req.techstack,
        focus = req.interview_type,
        amount = req.amount,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_mentions_every_field() {
        let req = GenerateRequest {
            interview_type: "behavioural".to_string(),
            role: "Data Engineer".to_string(),
            level: "lead".to_string(),
            techstack: "Spark,Airflow".to_string(),
            amount: "7".to_string(),
            userid: "u9".to_string(),
        };

        let prompt = build_prompt(&req);
        assert!(prompt.contains("The job role is Data Engineer."));
        assert!(prompt.contains("level is lead."));
        assert!(prompt.contains("Spark,Airflow"));
        assert!(prompt.contains("lean towards: behavioural."));
        assert!(prompt.contains("required is: 7."));
        assert!(!prompt.contains("u9"));
    }
}
