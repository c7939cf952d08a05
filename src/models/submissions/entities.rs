//! 提交实体与提交状态机
//!
//! 状态由存储事实推导：行存在 + grade 是否为空。
//! 所有状态迁移的合法性检查集中在 `SubmissionState` 上，服务层不得绕过。

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 提交实体，(assignment_id, learner_id) 唯一
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../clients/types/generated/submission.ts")]
pub struct Submission {
    pub id: i64,
    pub assignment_id: i64,
    pub learner_id: i64,
    pub content: String,
    // 附件下载 token 列表
    pub attachments: Vec<String>,
    pub submitted_at: chrono::DateTime<chrono::Utc>,
    // 得分，null 表示未评分；范围 [0, assignment.points]
    pub grade: Option<f64>,
    pub feedback: Option<String>,
    pub graded_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl Submission {
    pub fn state(&self) -> SubmissionState {
        if self.grade.is_some() {
            SubmissionState::Graded
        } else {
            SubmissionState::Submitted
        }
    }
}

// 提交状态
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../clients/types/generated/submission.ts")]
pub enum SubmissionState {
    NotSubmitted,
    Submitted,
    Graded,
}

// 状态迁移被拒绝的原因
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionDenied {
    ClassArchived,
    DeadlinePassed,
    AlreadyGraded,
    NoSubmission,
}

impl SubmissionState {
    pub fn of(submission: Option<&Submission>) -> Self {
        match submission {
            None => SubmissionState::NotSubmitted,
            Some(s) => s.state(),
        }
    }

    /// 提交/重交检查。检查顺序：归档 > 截止 > 已评分。
    pub fn check_submit(
        &self,
        now: chrono::DateTime<chrono::Utc>,
        due_date: chrono::DateTime<chrono::Utc>,
        class_archived: bool,
    ) -> Result<(), TransitionDenied> {
        if class_archived {
            return Err(TransitionDenied::ClassArchived);
        }
        if now > due_date {
            return Err(TransitionDenied::DeadlinePassed);
        }
        if *self == SubmissionState::Graded {
            return Err(TransitionDenied::AlreadyGraded);
        }
        Ok(())
    }

    /// 撤回检查。检查顺序：存在性 > 已评分 > 截止。
    pub fn check_withdraw(
        &self,
        now: chrono::DateTime<chrono::Utc>,
        due_date: chrono::DateTime<chrono::Utc>,
    ) -> Result<(), TransitionDenied> {
        match self {
            SubmissionState::NotSubmitted => Err(TransitionDenied::NoSubmission),
            SubmissionState::Graded => Err(TransitionDenied::AlreadyGraded),
            SubmissionState::Submitted => {
                if now > due_date {
                    Err(TransitionDenied::DeadlinePassed)
                } else {
                    Ok(())
                }
            }
        }
    }

    /// 评分检查。允许重复评分（覆盖），但必须已有提交。
    pub fn check_grade(&self) -> Result<(), TransitionDenied> {
        match self {
            SubmissionState::NotSubmitted => Err(TransitionDenied::NoSubmission),
            SubmissionState::Submitted | SubmissionState::Graded => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn submission(grade: Option<f64>) -> Submission {
        Submission {
            id: 1,
            assignment_id: 10,
            learner_id: 20,
            content: "my answer".to_string(),
            attachments: vec![],
            submitted_at: Utc::now(),
            grade,
            feedback: None,
            graded_at: grade.map(|_| Utc::now()),
        }
    }

    #[test]
    fn test_state_from_stored_facts() {
        assert_eq!(SubmissionState::of(None), SubmissionState::NotSubmitted);
        assert_eq!(
            SubmissionState::of(Some(&submission(None))),
            SubmissionState::Submitted
        );
        assert_eq!(
            SubmissionState::of(Some(&submission(Some(80.0)))),
            SubmissionState::Graded
        );
    }

    #[test]
    fn test_submit_before_deadline_allowed() {
        let now = Utc::now();
        let due = now + Duration::hours(1);
        assert!(SubmissionState::NotSubmitted.check_submit(now, due, false).is_ok());
        // 重交也允许
        assert!(SubmissionState::Submitted.check_submit(now, due, false).is_ok());
    }

    #[test]
    fn test_submit_after_deadline_denied() {
        let due = Utc::now();
        let now = due + Duration::seconds(1);
        assert_eq!(
            SubmissionState::NotSubmitted.check_submit(now, due, false),
            Err(TransitionDenied::DeadlinePassed)
        );
    }

    #[test]
    fn test_submit_at_deadline_allowed() {
        // now == due_date 恰好仍可提交
        let due = Utc::now();
        assert!(SubmissionState::NotSubmitted.check_submit(due, due, false).is_ok());
    }

    #[test]
    fn test_archived_class_blocks_submit_even_before_deadline() {
        let now = Utc::now();
        let due = now + Duration::days(7);
        assert_eq!(
            SubmissionState::NotSubmitted.check_submit(now, due, true),
            Err(TransitionDenied::ClassArchived)
        );
        // 取消归档后恢复
        assert!(SubmissionState::NotSubmitted.check_submit(now, due, false).is_ok());
    }

    #[test]
    fn test_graded_submission_locked_for_learner() {
        let now = Utc::now();
        let due = now + Duration::hours(1);
        assert_eq!(
            SubmissionState::Graded.check_submit(now, due, false),
            Err(TransitionDenied::AlreadyGraded)
        );
        assert_eq!(
            SubmissionState::Graded.check_withdraw(now, due),
            Err(TransitionDenied::AlreadyGraded)
        );
    }

    #[test]
    fn test_withdraw_rules() {
        let now = Utc::now();
        let due = now + Duration::hours(1);
        assert_eq!(
            SubmissionState::NotSubmitted.check_withdraw(now, due),
            Err(TransitionDenied::NoSubmission)
        );
        assert!(SubmissionState::Submitted.check_withdraw(now, due).is_ok());
        // 截止后不可撤回
        let past_due = now - Duration::hours(2);
        assert_eq!(
            SubmissionState::Submitted.check_withdraw(now, past_due),
            Err(TransitionDenied::DeadlinePassed)
        );
    }

    #[test]
    fn test_grade_requires_submission_and_allows_regrade() {
        assert_eq!(
            SubmissionState::NotSubmitted.check_grade(),
            Err(TransitionDenied::NoSubmission)
        );
        assert!(SubmissionState::Submitted.check_grade().is_ok());
        assert!(SubmissionState::Graded.check_grade().is_ok());
    }

    #[test]
    fn test_deadline_scenario_submit_then_deadline_moves_back() {
        // 作业截止 6月10日，学员 6月9日 提交成功；
        // 教师将截止改为 6月8日 后，撤回与重交都被拒绝。
        let due_june_10 = Utc::now() + Duration::days(2);
        let now_june_9 = Utc::now() + Duration::days(1);
        assert!(
            SubmissionState::NotSubmitted
                .check_submit(now_june_9, due_june_10, false)
                .is_ok()
        );

        let due_june_8 = Utc::now();
        assert_eq!(
            SubmissionState::Submitted.check_withdraw(now_june_9, due_june_8),
            Err(TransitionDenied::DeadlinePassed)
        );
        assert_eq!(
            SubmissionState::Submitted.check_submit(now_june_9, due_june_8, false),
            Err(TransitionDenied::DeadlinePassed)
        );
    }
}
