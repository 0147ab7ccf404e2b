// =====================
// 仕事（Job）のCRUDルール
// =====================

use serde::Deserialize;
use thiserror::Error;

use workload_ledger::model::{Job, JobId, JobStatus, StaffProfile};

use crate::domain::allocation_logic::adjust_workload_hours;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum JobFormError {
    #[error("Please fill in the job title, date, and duration to proceed.")]
    MissingFields,
    #[error("Duration must be a positive number of hours.")]
    InvalidDuration,
    #[error("The selected job no longer exists.")]
    JobNotFound,
}

/// フォームから渡ってくる未検証の仕事情報
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobDraft {
    pub title: String,
    pub date: String,
    pub duration: f64,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub description: String,
}

impl JobDraft {
    fn validate(&self) -> Result<(), JobFormError> {
        if self.title.trim().is_empty() || self.date.trim().is_empty() {
            return Err(JobFormError::MissingFields);
        }
        if !self.duration.is_finite() || self.duration <= 0.0 {
            return Err(JobFormError::InvalidDuration);
        }
        Ok(())
    }
}

/// 既存IDの数値サフィックスの最大値 + 1 で "JOB-<n>" を作る
pub fn next_job_id(jobs: &[Job]) -> JobId {
    let max = jobs
        .iter()
        .map(|job| {
            let digits: String = job.id.chars().filter(|c| c.is_ascii_digit()).collect();
            digits.parse::<u64>().unwrap_or(0)
        })
        .max()
        .unwrap_or(0);
    format!("JOB-{}", max + 1)
}

pub fn create_job(jobs: &mut Vec<Job>, draft: &JobDraft) -> Result<JobId, JobFormError> {
    draft.validate()?;
    let id = next_job_id(jobs);
    jobs.push(Job {
        id: id.clone(),
        title: draft.title.trim().to_string(),
        date: draft.date.trim().to_string(),
        duration: draft.duration,
        location: draft.location.trim().to_string(),
        description: draft.description.trim().to_string(),
        status: JobStatus::Unassigned,
        assigned_to: None,
        rejection_reason: None,
    });
    Ok(id)
}

pub fn update_job(jobs: &mut [Job], job_id: &str, draft: &JobDraft) -> Result<(), JobFormError> {
    draft.validate()?;
    let job = jobs
        .iter_mut()
        .find(|job| job.id == job_id)
        .ok_or(JobFormError::JobNotFound)?;
    job.title = draft.title.trim().to_string();
    job.date = draft.date.trim().to_string();
    job.duration = draft.duration;
    job.location = draft.location.trim().to_string();
    job.description = draft.description.trim().to_string();
    Ok(())
}

/// 削除。割当済みだった場合は担当者の稼働時間を返却する
pub fn delete_job(
    jobs: &mut Vec<Job>,
    profiles: &mut [StaffProfile],
    job_id: &str,
) -> Result<(), JobFormError> {
    let index = jobs
        .iter()
        .position(|job| job.id == job_id)
        .ok_or(JobFormError::JobNotFound)?;

    let job = jobs.remove(index);
    if let Some(assigned_to) = &job.assigned_to {
        adjust_workload_hours(profiles, assigned_to, -job.duration);
    }
    Ok(())
}
