//! Mitra system-prompt construction.
//!
//! The system prompt combines the persona with per-user context: name, role,
//! and a one-line summary of the latest persisted DVI record.

use crate::models::dvi::DviRecordRow;
use crate::models::user::User;

const PERSONA: &str = "You are Mitra, a female AI assistant of VitaAvanza. \
    You speak as 'I' and use she/her pronouns. \
    You help students, young workers, and migrants plan their life: \
    money, exams, work shifts, health logistics, and bureaucracy. \
    You are kind, practical, structured, and never judgmental. \
    You answer in a clear, structured, step-by-step way, always focusing on: \
    (1) reducing stress, (2) unlocking opportunities, and (3) improving the user's DVI. \
    Always think in terms of the four DVI pillars: Stability, Growth, \
    Wellbeing Load, Social Support, but explain things in human language.";

fn role_sentence(role: &str) -> &'static str {
    match role {
        "user" => "an individual student or young worker",
        "institution" => "a partner institution user",
        "admin" => "a VitaAvanza core team member",
        _ => "a VitaAvanza user",
    }
}

fn dvi_summary(last_dvi: Option<&DviRecordRow>) -> String {
    match last_dvi {
        Some(r) => format!(
            "Latest DVI — overall: {:.1} ({}), finance: {:.1}, logistics: {:.1}, \
             health: {:.1}, education: {:.1}, wellbeing: {:.1}.",
            r.overall_score,
            r.level,
            r.finance_score,
            r.logistics_score,
            r.health_score,
            r.education_score,
            r.wellbeing_score
        ),
        None => "No DVI data yet.".to_string(),
    }
}

pub fn build_system_prompt(user: &User, last_dvi: Option<&DviRecordRow>) -> String {
    let name = user.full_name.as_deref().unwrap_or("an anonymous VitaAvanza user");
    format!(
        "The user is {name} ({}) with email {}. {} {PERSONA}",
        role_sentence(&user.role),
        user.email,
        dvi_summary(last_dvi),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn make_user(full_name: Option<&str>, role: &str) -> User {
        User {
            id: 1,
            email: "ana@example.com".to_string(),
            full_name: full_name.map(str::to_string),
            hashed_password: "x".to_string(),
            role: role.to_string(),
            is_active: true,
            created_at: Utc::now(),
        }
    }

    fn make_record() -> DviRecordRow {
        DviRecordRow {
            id: 1,
            user_id: 1,
            finance_score: 55.0,
            logistics_score: 60.0,
            health_score: 70.0,
            education_score: 65.0,
            wellbeing_score: 50.0,
            overall_score: 60.25,
            level: "Medium".to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_prompt_includes_user_and_dvi() {
        let prompt = build_system_prompt(&make_user(Some("Ana Rossi"), "user"), Some(&make_record()));
        assert!(prompt.contains("Ana Rossi"));
        assert!(prompt.contains("ana@example.com"));
        assert!(prompt.contains("overall: 60.2 (Medium)"));
        assert!(prompt.contains("an individual student or young worker"));
        assert!(prompt.contains("You are Mitra"));
    }

    #[test]
    fn test_prompt_without_dvi_data() {
        let prompt = build_system_prompt(&make_user(None, "admin"), None);
        assert!(prompt.contains("No DVI data yet."));
        assert!(prompt.contains("an anonymous VitaAvanza user"));
        assert!(prompt.contains("a VitaAvanza core team member"));
    }

    #[test]
    fn test_unknown_role_falls_back() {
        let prompt = build_system_prompt(&make_user(Some("B"), "bot"), None);
        assert!(prompt.contains("a VitaAvanza user"));
    }
}
