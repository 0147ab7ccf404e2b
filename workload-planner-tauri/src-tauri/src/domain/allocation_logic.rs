// =====================
// 割当・受諾・辞退のルール
// =====================

use thiserror::Error;

use workload_ledger::model::{Job, JobStatus, StaffProfile};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AllocationError {
    #[error("Job not found.")]
    JobNotFound,
    #[error("This job is already being handled.")]
    AlreadyHandled,
    #[error("Staff profile not found.")]
    StaffNotFound,
    #[error("Selected staff is not eligible for this job.")]
    NotEligible,
    #[error("This assignment is no longer available.")]
    NotAssignedToStaff,
    #[error("This assignment has already been processed.")]
    AlreadyProcessed,
}

/// 稼働時間の積み下ろし。下限は0
pub fn adjust_workload_hours(profiles: &mut [StaffProfile], profile_id: &str, delta: f64) {
    if let Some(profile) = profiles.iter_mut().find(|profile| profile.id == profile_id) {
        profile.workload_hours = (profile.workload_hours + delta).max(0.0);
    }
}

/// 未割当の仕事を適格なスタッフへ割り当てる
pub fn allocate_job(
    jobs: &mut [Job],
    profiles: &mut [StaffProfile],
    job_id: &str,
    staff_id: &str,
) -> Result<(), AllocationError> {
    let job = jobs
        .iter_mut()
        .find(|job| job.id == job_id)
        .ok_or(AllocationError::JobNotFound)?;
    if job.status != JobStatus::Unassigned {
        return Err(AllocationError::AlreadyHandled);
    }

    let staff = profiles
        .iter()
        .find(|profile| profile.id == staff_id)
        .ok_or(AllocationError::StaffNotFound)?;
    if !staff.eligible {
        return Err(AllocationError::NotEligible);
    }

    job.status = JobStatus::Assigned;
    job.assigned_to = Some(staff_id.to_string());
    job.rejection_reason = None;
    let duration = job.duration;
    adjust_workload_hours(profiles, staff_id, duration);
    Ok(())
}

/// 自分に割り当てられた仕事を受諾する (assigned -> accepted)
pub fn accept_assignment(
    jobs: &mut [Job],
    job_id: &str,
    profile_id: &str,
) -> Result<(), AllocationError> {
    let job = jobs
        .iter_mut()
        .find(|job| job.id == job_id)
        .ok_or(AllocationError::JobNotFound)?;
    if job.assigned_to.as_deref() != Some(profile_id) {
        return Err(AllocationError::NotAssignedToStaff);
    }
    if job.status != JobStatus::Assigned {
        return Err(AllocationError::AlreadyProcessed);
    }
    job.status = JobStatus::Accepted;
    Ok(())
}

/// 辞退。仕事は未割当へ戻り、理由を記録し、稼働時間を返却する
pub fn reject_assignment(
    jobs: &mut [Job],
    profiles: &mut [StaffProfile],
    job_id: &str,
    profile_id: &str,
    reason: &str,
) -> Result<(), AllocationError> {
    let job = jobs
        .iter_mut()
        .find(|job| job.id == job_id)
        .ok_or(AllocationError::JobNotFound)?;
    if job.assigned_to.as_deref() != Some(profile_id) {
        return Err(AllocationError::NotAssignedToStaff);
    }

    adjust_workload_hours(profiles, profile_id, -job.duration);
    job.status = JobStatus::Unassigned;
    job.assigned_to = None;
    job.rejection_reason = Some(reason.to_string());
    Ok(())
}

// --- 稼働状況ラベル ---

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkloadStatus {
    High,
    Balanced,
    Low,
}

impl WorkloadStatus {
    pub fn label(&self) -> &'static str {
        match self {
            WorkloadStatus::High => "High",
            WorkloadStatus::Balanced => "Balanced",
            WorkloadStatus::Low => "Low",
        }
    }
}

/// cap に対する稼働率でラベルを決める。cap 0 は率0扱い
pub fn workload_status(profile: &StaffProfile) -> WorkloadStatus {
    let ratio = if profile.workload_cap > 0.0 {
        profile.workload_hours / profile.workload_cap
    } else {
        0.0
    };
    if ratio >= 0.9 {
        WorkloadStatus::High
    } else if ratio <= 0.4 {
        WorkloadStatus::Low
    } else {
        WorkloadStatus::Balanced
    }
}

#[cfg(test)]
mod allocation_logic_tests {
    use super::*;
    use workload_ledger::model::Job;

    fn job(id: &str, duration: f64) -> Job {
        Job {
            id: id.to_string(),
            title: "Delivery".to_string(),
            date: "2026-01-05".to_string(),
            duration,
            location: String::new(),
            description: String::new(),
            status: JobStatus::Unassigned,
            assigned_to: None,
            rejection_reason: None,
        }
    }

    fn staff(id: &str, eligible: bool, hours: f64, cap: f64) -> StaffProfile {
        StaffProfile {
            id: id.to_string(),
            name: id.to_string(),
            location: String::new(),
            eligible,
            workload_hours: hours,
            workload_cap: cap,
            monthly_workload: Default::default(),
            availability_entries: vec![],
            preference_entries: vec![],
            preference_notes: None,
        }
    }

    #[test]
    fn test_allocate_then_accept() {
        let mut jobs = vec![job("JOB-1", 4.0)];
        let mut profiles = vec![staff("staffA", true, 10.0, 40.0)];

        allocate_job(&mut jobs, &mut profiles, "JOB-1", "staffA").unwrap();
        assert_eq!(jobs[0].status, JobStatus::Assigned);
        assert_eq!(jobs[0].assigned_to.as_deref(), Some("staffA"));
        assert_eq!(profiles[0].workload_hours, 14.0);

        // 二重割当は弾く
        let r = allocate_job(&mut jobs, &mut profiles, "JOB-1", "staffA");
        assert_eq!(r, Err(AllocationError::AlreadyHandled));

        accept_assignment(&mut jobs, "JOB-1", "staffA").unwrap();
        assert_eq!(jobs[0].status, JobStatus::Accepted);

        // 受諾済みをもう一度受諾はできない
        let r = accept_assignment(&mut jobs, "JOB-1", "staffA");
        assert_eq!(r, Err(AllocationError::AlreadyProcessed));
    }

    #[test]
    fn test_allocate_requires_eligible_staff() {
        let mut jobs = vec![job("JOB-1", 4.0)];
        let mut profiles = vec![staff("staffC", false, 0.0, 32.0)];

        let r = allocate_job(&mut jobs, &mut profiles, "JOB-1", "staffC");
        assert_eq!(r, Err(AllocationError::NotEligible));
        assert_eq!(jobs[0].status, JobStatus::Unassigned, "失敗時は何も変えない");
        assert_eq!(profiles[0].workload_hours, 0.0);
    }

    #[test]
    fn test_reject_returns_hours() {
        let mut jobs = vec![job("JOB-1", 4.0)];
        let mut profiles = vec![staff("staffA", true, 10.0, 40.0)];
        allocate_job(&mut jobs, &mut profiles, "JOB-1", "staffA").unwrap();

        reject_assignment(&mut jobs, &mut profiles, "JOB-1", "staffA", "Family commitment")
            .unwrap();
        assert_eq!(jobs[0].status, JobStatus::Unassigned);
        assert!(jobs[0].assigned_to.is_none());
        assert_eq!(jobs[0].rejection_reason.as_deref(), Some("Family commitment"));
        assert_eq!(profiles[0].workload_hours, 10.0);

        // 他人の仕事は辞退できない
        jobs[0].status = JobStatus::Assigned;
        jobs[0].assigned_to = Some("staffB".to_string());
        let r = reject_assignment(&mut jobs, &mut profiles, "JOB-1", "staffA", "");
        assert_eq!(r, Err(AllocationError::NotAssignedToStaff));
    }

    #[test]
    fn test_hours_floor_at_zero() {
        let mut profiles = vec![staff("staffA", true, 2.0, 40.0)];
        adjust_workload_hours(&mut profiles, "staffA", -5.0);
        assert_eq!(profiles[0].workload_hours, 0.0);
    }

    #[test]
    fn test_workload_status_thresholds() {
        assert_eq!(workload_status(&staff("a", true, 36.0, 40.0)), WorkloadStatus::High);
        assert_eq!(workload_status(&staff("a", true, 16.0, 40.0)), WorkloadStatus::Low);
        assert_eq!(workload_status(&staff("a", true, 20.0, 40.0)), WorkloadStatus::Balanced);
        // cap 0 は率0扱いで Low
        assert_eq!(workload_status(&staff("a", true, 10.0, 0.0)), WorkloadStatus::Low);
    }
}
