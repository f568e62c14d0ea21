use std::fmt::Write;

use crate::models::{MedicalRecord, TodoTask};

pub const ASSISTANT_NAME: &str = "StepMate";

/// Patient state the assistant is primed with.
#[derive(Debug, Clone)]
pub struct PatientContext {
    pub medical_record: MedicalRecord,
    pub health_score: f64,
    pub risk_score: f64,
    pub max_pressure: f64,
    pub completed_tasks: usize,
    pub total_tasks: usize,
}

impl PatientContext {
    pub fn new(
        medical_record: MedicalRecord,
        health_score: f64,
        risk_score: f64,
        max_pressure: f64,
        today_tasks: &[TodoTask],
    ) -> Self {
        Self {
            medical_record,
            health_score,
            risk_score,
            max_pressure,
            completed_tasks: today_tasks.iter().filter(|task| task.completed).count(),
            total_tasks: today_tasks.len(),
        }
    }
}

fn joined_or(items: &[String], separator: &str, fallback: &str) -> String {
    if items.is_empty() {
        fallback.to_string()
    } else {
        items.join(separator)
    }
}

pub fn system_prompt(context: &PatientContext) -> String {
    let record = &context.medical_record;
    let mut prompt = format!(
        "You are {ASSISTANT_NAME}, a helpful AI assistant for diabetic foot care. \
         Here's the current patient context:\n\n"
    );

    // write! into a String cannot fail
    let _ = writeln!(prompt, "Medical Info:");
    let _ = writeln!(
        prompt,
        "- HbA1c: {}% (Last checked: {})",
        record.hba1c, record.last_hba1c_date
    );
    let _ = writeln!(prompt, "- Neuropathy Status: {:?}", record.neuropathy_status);
    let _ = writeln!(
        prompt,
        "- Active foot ulcers: {}",
        if record.has_foot_ulcers { "Yes" } else { "No" }
    );
    let _ = writeln!(
        prompt,
        "- Ulcer History: {}",
        joined_or(&record.ulcer_history, "; ", "None")
    );
    let _ = writeln!(prompt, "- Medications: {}", record.medications.join(", "));
    let _ = writeln!(prompt, "- Footwear: {}", record.footwear_habits.join(", "));

    let _ = writeln!(prompt, "\nCurrent Foot Data:");
    let _ = writeln!(prompt, "- Health Index: {:.0}/100", context.health_score);
    let _ = writeln!(prompt, "- Risk Score: {:.0}/100", context.risk_score);
    let _ = writeln!(prompt, "- Max Pressure: {:.1} kPa", context.max_pressure);

    let _ = writeln!(prompt, "\nDaily Tasks:");
    let _ = writeln!(
        prompt,
        "- Completed: {}/{}",
        context.completed_tasks, context.total_tasks
    );

    prompt.push_str(
        "\nProvide personalized, empathetic, and medically-informed guidance. \
         Always remind users to consult healthcare providers for medical decisions.",
    );
    prompt
}

/// First message sent to open a conversation.
pub fn greeting_prompt(context: &PatientContext) -> String {
    format!(
        "{}\n\nPlease introduce yourself as {ASSISTANT_NAME} and ask how you can help today. \
         Keep your response friendly and conversational.",
        system_prompt(context)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_summarizes_patient() {
        let context = PatientContext {
            medical_record: MedicalRecord::default(),
            health_score: 63.4,
            risk_score: 41.6,
            max_pressure: 58.26,
            completed_tasks: 2,
            total_tasks: 6,
        };

        let prompt = system_prompt(&context);
        assert!(prompt.starts_with("You are StepMate"));
        assert!(prompt.contains("- HbA1c: 7.2%"));
        assert!(prompt.contains("- Health Index: 63/100"));
        assert!(prompt.contains("- Risk Score: 42/100"));
        assert!(prompt.contains("- Max Pressure: 58.3 kPa"));
        assert!(prompt.contains("- Completed: 2/6"));
        assert!(prompt.ends_with("for medical decisions."));
    }

    #[test]
    fn empty_ulcer_history_reads_none() {
        let mut record = MedicalRecord::default();
        record.ulcer_history.clear();
        let context = PatientContext::new(record, 0.0, 0.0, 0.0, &[]);

        assert!(system_prompt(&context).contains("- Ulcer History: None"));
        assert!(greeting_prompt(&context).contains("introduce yourself as StepMate"));
    }
}
