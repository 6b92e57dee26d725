use std::collections::HashMap;

use crate::categories::{self, READING_COMPREHENSION};
use crate::log_pipeline_stage;
use crate::models::{
    AssessmentDefinition, AssessmentResponse, AssessmentResultView, CategoryScore,
    CategorySummary, ComprehensionQuestionResult, Question, QuestionBreakdown,
    StandardQuestionResult, Student,
};

/// Categories scoring below this contribute to `focusAreas`.
const FOCUS_AREA_THRESHOLD: f64 = 75.0;

/// Option id convention used by the submitting services when no option
/// carries an explicit correctness flag: "1" denotes the correct choice.
const CORRECT_OPTION_FALLBACK: &str = "1";

/// Cross-reference a response against its definition and produce the
/// per-category breakdown. Pure: all lookups have already happened.
pub fn compose(
    response: &AssessmentResponse,
    definition: &AssessmentDefinition,
    student: &Student,
) -> AssessmentResultView {
    let scores = categories::normalize_category_scores(&response.category_scores);
    let grouped = group_by_category(&definition.questions);

    let mut skill_details = Vec::with_capacity(grouped.len());
    let mut focus_areas = Vec::new();
    let mut total_questions = 0;
    let mut correct_answers = 0;

    // Iteration is driven by the definition's categories so that categories
    // with no submitted score still appear in the breakdown.
    for (category, questions) in &grouped {
        log_pipeline_stage!("compose", student_id = student.id, format!("processing category '{}'", category));

        let entry = scores.get(category).cloned().unwrap_or_else(|| CategoryScore {
            total: questions.len() as i64,
            correct: 0,
            score: 0.0,
        });

        let breakdown = if category == READING_COMPREHENSION {
            questions
                .iter()
                .map(|q| QuestionBreakdown::Comprehension(comprehension_result(q, &response.answers)))
                .collect()
        } else {
            questions
                .iter()
                .map(|q| QuestionBreakdown::Standard(standard_result(q, &response.answers)))
                .collect()
        };

        let category_name = categories::display_name(category);
        if entry.score < FOCUS_AREA_THRESHOLD {
            focus_areas.push(category_name.clone());
        }

        total_questions += entry.total;
        correct_answers += entry.correct;
        skill_details.push(CategorySummary {
            category: category.clone(),
            category_name,
            score: entry.score,
            correct: entry.correct,
            total: entry.total,
            questions: breakdown,
        });
    }

    AssessmentResultView {
        student_id: student.display_id(),
        student_name: student.full_name(),
        assessment_id: definition.assessment_id.clone(),
        reading_level: response
            .reading_level
            .clone()
            .or_else(|| student.reading_level.clone()),
        overall_score: response.reading_percentage,
        total_questions,
        correct_answers,
        part1_score: response.part1_score,
        completed_at: response.completed_at,
        time_taken: response.time_taken_seconds,
        category_scores: scores,
        difficulty_breakdown: response.difficulty_breakdown.clone(),
        skill_details,
        focus_areas,
        has_completed: true,
    }
}

/// Group questions by canonical category key, preserving the order in which
/// categories first appear in the definition.
fn group_by_category(questions: &[Question]) -> Vec<(String, Vec<&Question>)> {
    let mut order: Vec<String> = Vec::new();
    let mut buckets: HashMap<String, Vec<&Question>> = HashMap::new();

    for question in questions {
        let key = categories::normalize_category_key(&question.question_type_id);
        if !buckets.contains_key(&key) {
            order.push(key.clone());
        }
        buckets.entry(key).or_default().push(question);
    }

    order
        .into_iter()
        .map(|key| {
            let bucket = buckets.remove(&key).unwrap_or_default();
            (key, bucket)
        })
        .collect()
}

/// Judge the submitted value against the option flagged correct. Data
/// without an explicit flag falls back to the "1" id convention; so do
/// comprehension sub-questions, which have no option list.
fn is_answer_correct(submitted: Option<&str>, question: &Question) -> bool {
    let Some(submitted) = submitted else {
        return false;
    };
    match question.options.iter().find(|option| option.is_correct) {
        Some(correct) => submitted == correct.option_id,
        None => submitted == CORRECT_OPTION_FALLBACK,
    }
}

fn standard_result(
    question: &Question,
    answers: &HashMap<String, String>,
) -> StandardQuestionResult {
    let submitted = answers.get(&question.question_id).map(String::as_str);
    let correct_option = question.options.iter().find(|option| option.is_correct);
    let selected_option = submitted
        .and_then(|value| question.options.iter().find(|option| option.option_id == value));

    StandardQuestionResult {
        question_id: question.question_id.clone(),
        question_number: question.question_number,
        question_text: question.question_text.clone(),
        question_image: question.question_image.clone(),
        question_audio: question.question_audio.clone(),
        difficulty_level: question.difficulty_level.clone(),
        student_answer: selected_option.map(|option| option.option_text.clone()),
        correct_answer: correct_option.map(|option| option.option_text.clone()),
        is_correct: is_answer_correct(submitted, question),
    }
}

fn comprehension_result(
    question: &Question,
    answers: &HashMap<String, String>,
) -> ComprehensionQuestionResult {
    let mut pages = question.passages.clone();
    pages.sort_by_key(|page| page.page_number);
    let passage_text = pages
        .iter()
        .map(|page| page.page_text.as_str())
        .collect::<Vec<_>>()
        .join(" ");

    // Only the first embedded sub-question is authoritative for display and
    // scoring; the full list rides along for callers that need more.
    let first = question.comprehension_questions.first();
    let submitted = answers.get(&question.question_id).map(String::as_str);

    ComprehensionQuestionResult {
        question_id: question.question_id.clone(),
        question_number: question.question_number,
        question_text: question.question_text.clone(),
        passages: pages,
        passage_text,
        comprehension_question: first.map(|sub| sub.question_text.clone()),
        correct_answer: first.map(|sub| sub.correct_answer.clone()),
        incorrect_answer: first.map(|sub| sub.incorrect_answer.clone()),
        all_questions: question.comprehension_questions.clone(),
        student_answer: submitted.map(str::to_string),
        is_correct: is_answer_correct(submitted, question),
    }
}
