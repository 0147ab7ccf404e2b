use tauri::State;

use workload_ledger::document::planning_weeks;
use workload_ledger::ledger::SlotCandidate;
use workload_ledger::model::{AvailabilityEntry, Job, JobStatus, Role, StaffProfile, User};

use crate::application::dto::{MonthlySummary, SessionUser, WorkloadRow};
use crate::domain::{account_logic, allocation_logic, job_logic};
use crate::AppServices;

// --- Session ---

#[tauri::command]
pub fn login(
    username: String,
    password: String,
    services: State<'_, AppServices>,
) -> Result<SessionUser, String> {
    let store = services.store.lock().map_err(|e| e.to_string())?;
    let document = store.document();

    let user = account_logic::authenticate(document, &username, &password)
        .ok_or_else(|| String::from("Invalid username or password."))?;

    let mut session = SessionUser {
        username: user.username.clone(),
        role: user.role,
        profile_id: user.profile_id.clone(),
    };
    // profile_id の無い旧スタッフアカウントは先頭のスタッフへ紐付ける
    if session.role == Role::Staff && session.profile_id.is_none() {
        session.profile_id = account_logic::resolve_staff_profile(document, None)
            .map(|profile| profile.id.clone());
    }
    drop(store);

    *services.session.lock().map_err(|e| e.to_string())? = Some(session.clone());
    Ok(session)
}

#[tauri::command]
pub fn logout(services: State<'_, AppServices>) -> Result<(), String> {
    *services.session.lock().map_err(|e| e.to_string())? = None;
    Ok(())
}

#[tauri::command]
pub fn current_session(services: State<'_, AppServices>) -> Result<Option<SessionUser>, String> {
    Ok(services.session.lock().map_err(|e| e.to_string())?.clone())
}

// --- Planning weeks (UIセレクトの選択肢 = 閉じた集合) ---

#[tauri::command]
pub fn list_planning_weeks() -> Vec<String> {
    planning_weeks()
}

// --- Manager: workload overview ---

#[tauri::command]
pub fn list_workload_rows(services: State<'_, AppServices>) -> Result<Vec<WorkloadRow>, String> {
    let store = services.store.lock().map_err(|e| e.to_string())?;
    let document = store.document();

    let rows = document
        .staff_profiles
        .iter()
        .map(|profile| {
            let assigned_jobs = document
                .jobs
                .iter()
                .filter(|job| {
                    job.assigned_to.as_deref() == Some(profile.id.as_str())
                        && job.status != JobStatus::Unassigned
                })
                .count();
            WorkloadRow {
                staff_id: profile.id.clone(),
                name: profile.name.clone(),
                workload_hours: profile.workload_hours,
                workload_cap: profile.workload_cap,
                assigned_jobs,
                status_label: allocation_logic::workload_status(profile).label(),
            }
        })
        .collect();
    Ok(rows)
}

// --- Manager: job CRUD ---

#[tauri::command]
pub fn list_jobs(services: State<'_, AppServices>) -> Result<Vec<Job>, String> {
    let store = services.store.lock().map_err(|e| e.to_string())?;
    Ok(store.document().jobs.clone())
}

#[tauri::command]
pub fn create_job(
    draft: job_logic::JobDraft,
    services: State<'_, AppServices>,
) -> Result<String, String> {
    let mut store = services.store.lock().map_err(|e| e.to_string())?;
    let id = job_logic::create_job(&mut store.document_mut().jobs, &draft)
        .map_err(|e| e.to_string())?;
    store.save()?;
    Ok(id)
}

#[tauri::command]
pub fn update_job(
    job_id: String,
    draft: job_logic::JobDraft,
    services: State<'_, AppServices>,
) -> Result<(), String> {
    let mut store = services.store.lock().map_err(|e| e.to_string())?;
    job_logic::update_job(&mut store.document_mut().jobs, &job_id, &draft)
        .map_err(|e| e.to_string())?;
    store.save()
}

#[tauri::command]
pub fn delete_job(job_id: String, services: State<'_, AppServices>) -> Result<(), String> {
    let mut store = services.store.lock().map_err(|e| e.to_string())?;
    let document = store.document_mut();
    job_logic::delete_job(&mut document.jobs, &mut document.staff_profiles, &job_id)
        .map_err(|e| e.to_string())?;
    store.save()
}

// --- Manager: allocation ---

#[tauri::command]
pub fn allocate_job(
    job_id: String,
    staff_id: String,
    services: State<'_, AppServices>,
) -> Result<(), String> {
    let mut store = services.store.lock().map_err(|e| e.to_string())?;
    let document = store.document_mut();
    allocation_logic::allocate_job(
        &mut document.jobs,
        &mut document.staff_profiles,
        &job_id,
        &staff_id,
    )
    .map_err(|e| e.to_string())?;
    store.save()
}

// --- Staff: assignments ---

#[tauri::command]
pub fn list_assignments(
    profile_id: String,
    services: State<'_, AppServices>,
) -> Result<Vec<Job>, String> {
    let store = services.store.lock().map_err(|e| e.to_string())?;
    Ok(store
        .document()
        .jobs
        .iter()
        .filter(|job| {
            job.assigned_to.as_deref() == Some(profile_id.as_str())
                && job.status != JobStatus::Unassigned
        })
        .cloned()
        .collect())
}

#[tauri::command]
pub fn accept_assignment(
    job_id: String,
    profile_id: String,
    services: State<'_, AppServices>,
) -> Result<(), String> {
    let mut store = services.store.lock().map_err(|e| e.to_string())?;
    allocation_logic::accept_assignment(&mut store.document_mut().jobs, &job_id, &profile_id)
        .map_err(|e| e.to_string())?;
    store.save()
}

#[tauri::command]
pub fn reject_assignment(
    job_id: String,
    profile_id: String,
    reason: String,
    services: State<'_, AppServices>,
) -> Result<(), String> {
    let mut store = services.store.lock().map_err(|e| e.to_string())?;
    let document = store.document_mut();
    allocation_logic::reject_assignment(
        &mut document.jobs,
        &mut document.staff_profiles,
        &job_id,
        &profile_id,
        &reason,
    )
    .map_err(|e| e.to_string())?;
    store.save()
}

// --- Staff: profile / monthly summary ---

#[tauri::command]
pub fn list_staff_profiles(
    services: State<'_, AppServices>,
) -> Result<Vec<StaffProfile>, String> {
    let store = services.store.lock().map_err(|e| e.to_string())?;
    Ok(store.document().staff_profiles.clone())
}

#[tauri::command]
pub fn get_staff_profile(
    profile_id: String,
    services: State<'_, AppServices>,
) -> Result<StaffProfile, String> {
    let store = services.store.lock().map_err(|e| e.to_string())?;
    account_logic::resolve_staff_profile(store.document(), Some(&profile_id))
        .cloned()
        .ok_or_else(|| String::from("Staff profile not found."))
}

#[tauri::command]
pub fn monthly_summary(
    profile_id: String,
    month: String,
    services: State<'_, AppServices>,
) -> Result<MonthlySummary, String> {
    let store = services.store.lock().map_err(|e| e.to_string())?;
    let profile = account_logic::resolve_staff_profile(store.document(), Some(&profile_id))
        .ok_or_else(|| String::from("Staff profile not found."))?;

    // データの無い月は0時間の空サマリを返す（エラーにはしない）
    let summary = match profile.monthly_workload.get(&month) {
        Some(workload) => MonthlySummary {
            month,
            total_hours: workload.total_hours,
            weeks: workload.weeks.clone(),
        },
        None => MonthlySummary {
            month,
            total_hours: 0.0,
            weeks: vec![],
        },
    };
    Ok(summary)
}

// --- Staff: availability ledger ---

#[tauri::command]
pub fn add_availability_entry(
    profile_id: String,
    candidate: SlotCandidate,
    services: State<'_, AppServices>,
) -> Result<(), String> {
    let weeks = planning_weeks();
    let mut store = services.store.lock().map_err(|e| e.to_string())?;
    let profile = store
        .document_mut()
        .staff_profiles
        .iter_mut()
        .find(|profile| profile.id == profile_id)
        .ok_or_else(|| String::from("Staff profile not found."))?;
    profile.add_entry(&weeks, &candidate).map_err(|e| e.to_string())?;
    store.save()
}

#[tauri::command]
pub fn edit_availability_entry(
    profile_id: String,
    entry_id: String,
    candidate: SlotCandidate,
    services: State<'_, AppServices>,
) -> Result<(), String> {
    let weeks = planning_weeks();
    let mut store = services.store.lock().map_err(|e| e.to_string())?;
    let profile = store
        .document_mut()
        .staff_profiles
        .iter_mut()
        .find(|profile| profile.id == profile_id)
        .ok_or_else(|| String::from("Staff profile not found."))?;
    profile
        .edit_entry(&weeks, &entry_id, &candidate)
        .map_err(|e| e.to_string())?;
    store.save()
}

#[tauri::command]
pub fn list_week_entries(
    profile_id: String,
    week: String,
    services: State<'_, AppServices>,
) -> Result<Vec<AvailabilityEntry>, String> {
    let store = services.store.lock().map_err(|e| e.to_string())?;
    let profile = account_logic::resolve_staff_profile(store.document(), Some(&profile_id))
        .ok_or_else(|| String::from("Staff profile not found."))?;
    Ok(profile.list_entries_for_week(&week))
}

#[tauri::command]
pub fn save_preference(
    profile_id: String,
    week: String,
    job_types: String,
    locations: String,
    services: State<'_, AppServices>,
) -> Result<(), String> {
    let weeks = planning_weeks();
    let mut store = services.store.lock().map_err(|e| e.to_string())?;
    let profile = store
        .document_mut()
        .staff_profiles
        .iter_mut()
        .find(|profile| profile.id == profile_id)
        .ok_or_else(|| String::from("Staff profile not found."))?;
    profile
        .save_preference(&weeks, &week, &job_types, &locations)
        .map_err(|e| e.to_string())?;
    store.save()
}

// --- Admin: user CRUD ---

#[tauri::command]
pub fn list_users(services: State<'_, AppServices>) -> Result<Vec<User>, String> {
    let store = services.store.lock().map_err(|e| e.to_string())?;
    Ok(store.document().users.clone())
}

#[tauri::command]
pub fn create_user(user: User, services: State<'_, AppServices>) -> Result<(), String> {
    let mut store = services.store.lock().map_err(|e| e.to_string())?;
    let users = &mut store.document_mut().users;

    let username = user.username.trim().to_lowercase();
    if username.is_empty() {
        return Err(String::from("Username must not be empty."));
    }
    if users.iter().any(|existing| existing.username == username) {
        return Err(format!("User \"{}\" already exists.", username));
    }
    users.push(User { username, ..user });
    store.save()
}

#[tauri::command]
pub fn update_user(
    username: String,
    user: User,
    services: State<'_, AppServices>,
) -> Result<(), String> {
    let mut store = services.store.lock().map_err(|e| e.to_string())?;
    let users = &mut store.document_mut().users;
    let existing = users
        .iter_mut()
        .find(|existing| existing.username == username)
        .ok_or_else(|| format!("User \"{}\" was not found.", username))?;
    *existing = User {
        username: user.username.trim().to_lowercase(),
        ..user
    };
    store.save()
}

#[tauri::command]
pub fn delete_user(username: String, services: State<'_, AppServices>) -> Result<(), String> {
    let mut store = services.store.lock().map_err(|e| e.to_string())?;
    let users = &mut store.document_mut().users;
    let before = users.len();
    users.retain(|user| user.username != username);
    if users.len() == before {
        return Err(format!("User \"{}\" was not found.", username));
    }
    store.save()
}

// --- Demo reset ---

#[tauri::command]
pub fn reset_demo_data(services: State<'_, AppServices>) -> Result<(), String> {
    let mut store = services.store.lock().map_err(|e| e.to_string())?;
    store.reseed()
}
