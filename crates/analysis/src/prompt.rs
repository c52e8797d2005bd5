//! Prompt construction for answer evaluation.
//!
//! All prompts demand the same fixed JSON schema so one normalization path
//! covers every backend. Degenerate answers are flagged here so callers can
//! skip the provider round trip entirely.

use crate::adaptive::ScoreSummary;

/// Single-word "answers" that are really just a language name. These show
/// up when candidates misread the question and are never worth a provider
/// call.
const LANGUAGE_STOPLIST: [&str; 4] = ["hindi", "english", "french", "spanish"];

/// The JSON schema every evaluation prompt demands.
const SCHEMA_JSON: &str = r#"{
    "technical_accuracy": <number>,
    "clarity_structure": <number>,
    "depth_of_knowledge": <number>,
    "communication": <number>,
    "confidence": <number>,
    "reasoning": <number>,
    "emotion": <number>,
    "strengths": ["strength1", "strength2", "strength3"],
    "improvements": ["improvement1", "improvement2", "improvement3"],
    "suggestions": ["suggestion1", "suggestion2", "suggestion3"],
    "recommended_resources": [
        {"title": "Resource 1", "description": "Description 1"},
        {"title": "Resource 2", "description": "Description 2"}
    ]
}"#;

/// Scoring bands appended to evaluation prompts to keep models stringent.
const SCORE_BANDS: &str = "\
Be strict but fair in your evaluation. Scores should reflect genuine performance:
90-100: Exceptional quality - Rarely achieved, only for truly outstanding responses
80-89: Strong quality - Well above average, demonstrates expertise
70-79: Good quality - Solid performance, minor improvements needed
60-69: Satisfactory quality - Meets basic requirements but lacks depth
50-59: Below average - Significant gaps in knowledge or presentation
40-49: Poor quality - Fundamental weaknesses evident
30-39: Very poor quality - Minimal understanding shown
0-29: Extremely poor quality - Irrelevant or nonsensical response

Be more stringent in your scoring. A score of 80+ should be rare and only given for truly exceptional responses.
Look for specific examples, concrete details, and deep understanding of the subject matter.
Generic or vague responses should score in the 50-60 range at best.";

/// A built prompt plus whether the input it was built from is degenerate.
#[derive(Debug, Clone)]
pub struct Prompt {
    pub text: String,
    pub degenerate: bool,
}

/// True for answers too short or too empty of content to evaluate.
pub fn is_degenerate(input: &str) -> bool {
    let trimmed = input.trim();
    trimmed.len() < 10 || LANGUAGE_STOPLIST.contains(&trimmed.to_lowercase().as_str())
}

fn domain_guidance(domain: &str) -> &'static str {
    match domain {
        "ml" => "Focus on machine learning concepts, algorithms, model evaluation, and practical implementation.",
        "ds" => "Focus on statistical analysis, data interpretation, visualization, and data-driven decision making.",
        "se" => "Focus on software design principles, coding practices, system architecture, and problem-solving approaches.",
        "fin" => "Focus on financial concepts, valuation methods, market analysis, and risk assessment.",
        "pm" => "Focus on product strategy, user research, prioritization frameworks, and cross-functional collaboration.",
        "ux" => "Focus on user-centered design, usability principles, research methods, and interface design.",
        "hr" => "Focus on people management, organizational behavior, recruitment practices, and employee development.",
        "sales" => "Focus on sales strategies, customer relationship management, negotiation techniques, and revenue generation.",
        _ => "Provide a balanced evaluation appropriate for the question and answer.",
    }
}

fn interviewer_role(domain: &str) -> String {
    if domain.is_empty() {
        "Professional".to_string()
    } else {
        domain.to_uppercase()
    }
}

/// Builds the evaluation prompts sent to either backend.
pub struct PromptBuilder;

impl PromptBuilder {
    /// Prompt for evaluating a written answer in a given domain.
    pub fn text_prompt(question: &str, answer: &str, domain: &str) -> Prompt {
        if is_degenerate(answer) {
            return Prompt {
                text: Self::degenerate_prompt(question, answer, domain),
                degenerate: true,
            };
        }

        let text = format!(
            "You are an expert {role} interviewer evaluating a candidate's response.\n\
             \n\
             Question: {question}\n\
             Candidate's Answer: {answer}\n\
             \n\
             {guidance}\n\
             \n\
             Please analyze this response and provide a detailed evaluation with the following metrics:\n\
             1. Technical Accuracy (0-100): How technically correct and accurate is the response?\n\
             2. Clarity & Structure (0-100): How clear, organized, and well-structured is the response?\n\
             3. Depth of Knowledge (0-100): How deep and comprehensive is the knowledge demonstrated?\n\
             4. Communication (0-100): How effective is the communication style and language used?\n\
             5. Confidence (0-100): How confident and assertive is the tone without being arrogant?\n\
             6. Reasoning (0-100): How logical and well-reasoned is the thought process?\n\
             7. Emotional Intelligence (0-100): How appropriate is the emotional tone and empathy shown?\n\
             \n\
             Also provide:\n\
             - 3 key strengths of the response\n\
             - 3 areas for improvement\n\
             - 3 specific suggestions for better answers\n\
             - 2 relevant learning resources for this domain\n\
             \n\
             Format your response as JSON with this exact structure:\n\
             {schema}\n\
             \n\
             {bands}\n\
             \n\
             Respond ONLY with the JSON object, no other text.",
            role = interviewer_role(domain),
            question = question,
            answer = answer,
            guidance = domain_guidance(domain),
            schema = SCHEMA_JSON,
            bands = SCORE_BANDS,
        );
        Prompt {
            text,
            degenerate: false,
        }
    }

    /// Prompt for evaluating a spoken-answer transcript.
    pub fn speech_prompt(transcript: &str) -> Prompt {
        if is_degenerate(transcript) {
            return Prompt {
                text: Self::degenerate_prompt("(spoken response)", transcript, ""),
                degenerate: true,
            };
        }

        let text = format!(
            "You are an expert technical interviewer with deep domain knowledge. You are evaluating a candidate's spoken response in a technical interview.\n\
             \n\
             Transcript: {transcript}\n\
             \n\
             Evaluate these specific aspects with strict technical standards:\n\
             1. Technical Accuracy (0-100): How technically correct and precise is the content? Penalize incorrect information heavily.\n\
             2. Clarity & Structure (0-100): Is the response well-organized with a logical flow? Look for clear progression of ideas.\n\
             3. Depth of Knowledge (0-100): Does the answer demonstrate deep understanding of the subject? Look for specific details, examples, and nuanced understanding.\n\
             4. Communication Skills (0-100): How clear and effective is the verbal communication? Consider pace, clarity, and articulation.\n\
             5. Confidence (0-100): Does the speaker sound self-assured and knowledgeable? Base this on content quality, not just tone.\n\
             6. Reasoning (0-100): Is the logic sound and well-reasoned? Look for evidence-based thinking and problem-solving approach.\n\
             7. Emotional Intelligence (0-100): How well does the speaker connect and engage? Consider professionalism and interpersonal awareness.\n\
             \n\
             Also provide:\n\
             - 3 key strengths (be specific and technical)\n\
             - 3 areas for improvement (be actionable and focused on content/structure)\n\
             - 3 specific suggestions for better verbal communication in technical contexts\n\
             - 2 high-quality, domain-specific learning resources\n\
             \n\
             Be strict but fair. Give specific, actionable feedback based on the actual content of the transcript.\n\
             Focus on helping the candidate improve their technical communication skills.\n\
             \n\
             Format your response as JSON with this exact structure:\n\
             {schema}\n\
             \n\
             Respond ONLY with the JSON object, no other text.",
            transcript = transcript,
            schema = SCHEMA_JSON,
        );
        Prompt {
            text,
            degenerate: false,
        }
    }

    /// Prompt for an answer too thin to evaluate. Still well-formed so a
    /// caller that insists on a provider round trip gets schema-shaped
    /// output back.
    fn degenerate_prompt(question: &str, answer: &str, domain: &str) -> String {
        format!(
            "You are an expert {role} interviewer evaluating a candidate's response.\n\
             \n\
             Question: {question}\n\
             Candidate's Answer: {answer}\n\
             \n\
             This answer is clearly irrelevant or insufficient to evaluate properly. The candidate has provided minimal information that does not demonstrate any meaningful knowledge or skills.\n\
             \n\
             Please provide a strict evaluation with very low scores and appropriate feedback:\n\
             {schema}\n\
             \n\
             Respond ONLY with the JSON object, no other text.",
            role = interviewer_role(domain),
            question = question,
            answer = answer,
            schema = SCHEMA_JSON,
        )
    }

    /// Prompt asking the model to choose a follow-up question.
    pub fn adaptive_prompt(
        previous_question: &str,
        user_answer: &str,
        scores: &ScoreSummary,
        weaknesses: &[String],
    ) -> String {
        let weaknesses_line = if weaknesses.is_empty() {
            "None".to_string()
        } else {
            weaknesses.join(", ")
        };
        format!(
            "You are an expert technical interviewer conducting a live interview. Based on the candidate's performance, generate an adaptive follow-up question.\n\
             \n\
             Previous Question: {previous_question}\n\
             Candidate's Answer: {user_answer}\n\
             \n\
             Performance Scores:\n\
             - Technical Accuracy: {technical}/100\n\
             - Clarity & Structure: {clarity}/100\n\
             - Depth of Knowledge: {depth}/100\n\
             - Communication: {communication}/100\n\
             - Confidence: {confidence}/100\n\
             - Reasoning: {reasoning}/100\n\
             \n\
             Identified Weaknesses:\n\
             {weaknesses}\n\
             \n\
             Instructions:\n\
             1. If the candidate performed well (scores > 80), ask a more challenging question that probes deeper into their expertise\n\
             2. If the candidate had mixed performance, ask a question that addresses their specific weaknesses\n\
             3. If the candidate struggled (scores < 60), ask a foundational question to assess their core knowledge\n\
             4. Ensure the question is relevant to the domain of the previous question\n\
             5. Make the question specific and actionable\n\
             6. NEVER use predefined question templates - generate completely new, context-specific questions\n\
             7. Focus on the actual content of the candidate's answer, not generic topics\n\
             8. Each question MUST be UNIQUE - do not repeat similar phrasing or concepts\n\
             \n\
             Respond ONLY with a JSON object in this exact format:\n\
             {{\n\
                 \"category\": \"string (strong/medium/weak/confused)\",\n\
                 \"action\": \"string (deep_drill/ask_clarification/simplify_and_probe/moderate_followup/challenge_misconception/validate_then_probe)\",\n\
                 \"next_question\": \"string (the actual question to ask)\"\n\
             }}",
            previous_question = previous_question,
            user_answer = user_answer,
            technical = scores.technical_accuracy,
            clarity = scores.clarity_structure,
            depth = scores.depth_of_knowledge,
            communication = scores.communication,
            confidence = scores.confidence,
            reasoning = scores.reasoning,
            weaknesses = weaknesses_line,
        )
    }

    /// Prompt asking the model to interpret one numeric video window.
    pub fn window_prompt(
        window_start: i64,
        window_end: i64,
        head_disp: &[f64],
        bbox_width: &[f64],
        avg_iris_x: &[f64],
        blink_rate: f64,
    ) -> String {
        format!(
            "You receive numeric sequences measured between {start} and {end} ms:\n\
             \n\
             head_disp: {head_disp:?}\n\
             bbox_width: {bbox_width:?}\n\
             avg_iris_x: {avg_iris_x:?}\n\
             blink_rate: {blink_rate}\n\
             \n\
             Interpret the window and return ONLY this JSON:\n\
             {{\"window_start\": {start}, \"window_end\": {end}, \"eye_contact_score\": 0, \"head_stability_score\": 0, \"posture_score\": 0, \"confidence_score\": 0, \"notes\": \"\"}}\n\
             Consider eye contact high when avg_iris_x close to 0.5 with low jitter; head stability penalize large changes; posture uses bbox width stability.",
            start = window_start,
            end = window_end,
            head_disp = head_disp,
            bbox_width = bbox_width,
            avg_iris_x = avg_iris_x,
            blink_rate = blink_rate,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_answers_are_degenerate() {
        assert!(is_degenerate(""));
        assert!(is_degenerate("   yes   "));
        assert!(!is_degenerate("REST is an architectural style for APIs."));
    }

    #[test]
    fn language_names_are_degenerate_regardless_of_case() {
        assert!(is_degenerate("English"));
        assert!(is_degenerate("  HINDI  "));
        // Long enough and not on the stoplist
        assert!(!is_degenerate("english grammar rules"));
    }

    #[test]
    fn text_prompt_embeds_question_and_guidance() {
        let prompt = PromptBuilder::text_prompt(
            "What is REST?",
            "REST is an architectural style built on HTTP verbs and resources.",
            "se",
        );
        assert!(!prompt.degenerate);
        assert!(prompt.text.contains("What is REST?"));
        assert!(prompt.text.contains("software design principles"));
        assert!(prompt.text.contains("expert SE interviewer"));
        assert!(prompt.text.contains("Respond ONLY with the JSON object"));
    }

    #[test]
    fn unknown_domain_gets_generic_guidance() {
        let prompt = PromptBuilder::text_prompt(
            "Tell me about yourself.",
            "I have five years of experience leading small teams.",
            "unknown",
        );
        assert!(prompt.text.contains("balanced evaluation"));
    }

    #[test]
    fn degenerate_answer_yields_degenerate_prompt() {
        let prompt = PromptBuilder::text_prompt("What is REST?", "idk", "se");
        assert!(prompt.degenerate);
        assert!(prompt.text.contains("clearly irrelevant or insufficient"));
    }

    #[test]
    fn speech_prompt_embeds_transcript() {
        let prompt = PromptBuilder::speech_prompt(
            "Today I want to talk about how we scaled our database layer.",
        );
        assert!(!prompt.degenerate);
        assert!(prompt.text.contains("spoken response"));
        assert!(prompt.text.contains("scaled our database layer"));
    }

    #[test]
    fn adaptive_prompt_lists_scores_and_weaknesses() {
        let scores = ScoreSummary {
            technical_accuracy: 90,
            clarity_structure: 55,
            ..Default::default()
        };
        let prompt = PromptBuilder::adaptive_prompt(
            "Explain database indexing.",
            "Indexes speed up lookups.",
            &scores,
            &["shallow depth".to_string(), "short answers".to_string()],
        );
        assert!(prompt.contains("Technical Accuracy: 90/100"));
        assert!(prompt.contains("Clarity & Structure: 55/100"));
        assert!(prompt.contains("shallow depth, short answers"));
    }

    #[test]
    fn window_prompt_echoes_bounds() {
        let prompt =
            PromptBuilder::window_prompt(0, 4000, &[0.01, 0.02], &[0.4, 0.41], &[0.5], 0.2);
        assert!(prompt.contains("between 0 and 4000 ms"));
        assert!(prompt.contains("\"window_start\": 0"));
        assert!(prompt.contains("blink_rate: 0.2"));
    }
}
