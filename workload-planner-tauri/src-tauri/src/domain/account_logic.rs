// =====================
// アカウントとセッション解決
// =====================

use workload_ledger::document::PlannerDocument;
use workload_ledger::model::{StaffProfile, User};

/// ユーザー名（小文字化・前後空白無視）とパスワードの完全一致で照合する
pub fn authenticate<'a>(
    document: &'a PlannerDocument,
    username: &str,
    password: &str,
) -> Option<&'a User> {
    let username = username.trim().to_lowercase();
    let password = password.trim();

    document
        .users
        .iter()
        .find(|user| user.username == username && user.password == password)
}

/// セッションの profile_id からスタッフ台帳を引く。
/// profile_id が無い旧セッションは先頭のスタッフへフォールバックする
pub fn resolve_staff_profile<'a>(
    document: &'a PlannerDocument,
    profile_id: Option<&str>,
) -> Option<&'a StaffProfile> {
    match profile_id {
        Some(id) => document.staff_profiles.iter().find(|profile| profile.id == id),
        None => document.staff_profiles.first(),
    }
}

#[cfg(test)]
mod account_logic_tests {
    use super::*;
    use workload_ledger::model::Role;

    fn document() -> PlannerDocument {
        PlannerDocument {
            version: "2".to_string(),
            users: vec![User {
                username: "manager".to_string(),
                password: "manager123".to_string(),
                role: Role::Manager,
                profile_id: None,
            }],
            jobs: vec![],
            staff_profiles: vec![],
        }
    }

    #[test]
    fn test_authenticate() {
        let document = document();

        assert!(authenticate(&document, "manager", "manager123").is_some());
        // 大文字・前後空白は吸収する
        assert!(authenticate(&document, "  Manager ", "manager123").is_some());
        // パスワードは厳密一致
        assert!(authenticate(&document, "manager", "Manager123").is_none());
        assert!(authenticate(&document, "nobody", "manager123").is_none());
    }
}
