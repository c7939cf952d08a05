//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod assignments;
mod classes;
mod enrollments;
mod files;
mod materials;
mod stats;
mod submissions;
mod users;

use crate::config::AppConfig;
use crate::errors::{LearnSyncError, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 创建新的 SeaORM 存储实例
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        let db_url = Self::build_database_url(&config.database.url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite://") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        // 运行迁移
        Migrator::up(&db, None)
            .await
            .map_err(|e| LearnSyncError::database_operation(format!("数据库迁移失败: {e}")))?;

        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(Self { db })
    }

    /// 底层数据库连接（供嵌入式对象存储等直接使用）
    pub fn database(&self) -> &DatabaseConnection {
        &self.db
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| LearnSyncError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory")
            .pragma("mmap_size", "536870912")
            .pragma("wal_autocheckpoint", "1000");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.database.pool_size)
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(300))
            .connect_with(opt)
            .await
            .map_err(|e| LearnSyncError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.database.pool_size)
            .min_connections(5)
            .connect_timeout(Duration::from_secs(config.database.timeout))
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| LearnSyncError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite://") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") || url == ":memory:" {
            Ok(format!("sqlite://{}?mode=rwc", url))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(LearnSyncError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }
}

// Storage trait 实现
use crate::models::{
    assignments::{
        entities::Assignment,
        requests::{CreateAssignmentRequest, UpdateDueDateRequest},
    },
    classes::{
        entities::Class,
        requests::{ClassListQuery, CreateClassRequest, UpdateClassRequest},
        responses::ClassListResponse,
    },
    enrollments::{entities::Enrollment, responses::ClassMemberListResponse},
    files::entities::File,
    materials::{entities::Material, requests::CreateMaterialRequest},
    submissions::{
        entities::Submission, requests::SubmitAssignmentRequest, responses::SubmissionListResponse,
    },
    system::responses::{HealthResponse, InstructorStatsResponse, LearnerStatsResponse},
    users::{entities::User, requests::CreateUserParams},
};
use crate::storage::Storage;
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 用户模块
    async fn create_user(&self, params: CreateUserParams) -> Result<User> {
        self.create_user_impl(params).await
    }

    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        self.get_user_by_id_impl(id).await
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        self.get_user_by_email_impl(email).await
    }

    async fn update_last_login(&self, id: i64) -> Result<bool> {
        self.update_last_login_impl(id).await
    }

    async fn update_password(&self, id: i64, password_hash: &str) -> Result<bool> {
        self.update_password_impl(id, password_hash).await
    }

    // 班级模块
    async fn create_class(&self, owner_id: i64, req: CreateClassRequest) -> Result<Class> {
        self.create_class_impl(owner_id, req).await
    }

    async fn get_class_by_id(&self, class_id: i64) -> Result<Option<Class>> {
        self.get_class_by_id_impl(class_id).await
    }

    async fn get_class_by_code(&self, code: &str) -> Result<Option<Class>> {
        self.get_class_by_code_impl(code).await
    }

    async fn list_owned_classes(
        &self,
        owner_id: i64,
        query: ClassListQuery,
    ) -> Result<ClassListResponse> {
        self.list_owned_classes_impl(owner_id, query).await
    }

    async fn list_enrolled_classes(
        &self,
        learner_id: i64,
        query: ClassListQuery,
    ) -> Result<ClassListResponse> {
        self.list_enrolled_classes_impl(learner_id, query).await
    }

    async fn update_class(
        &self,
        class_id: i64,
        update: UpdateClassRequest,
    ) -> Result<Option<Class>> {
        self.update_class_impl(class_id, update).await
    }

    async fn set_class_archived(&self, class_id: i64, archived: bool) -> Result<Option<Class>> {
        self.set_class_archived_impl(class_id, archived).await
    }

    async fn delete_class(&self, class_id: i64) -> Result<bool> {
        self.delete_class_impl(class_id).await
    }

    // 选课模块
    async fn create_enrollment(&self, class_id: i64, learner_id: i64) -> Result<Enrollment> {
        self.create_enrollment_impl(class_id, learner_id).await
    }

    async fn delete_enrollment(&self, class_id: i64, learner_id: i64) -> Result<bool> {
        self.delete_enrollment_impl(class_id, learner_id).await
    }

    async fn get_enrollment(&self, class_id: i64, learner_id: i64) -> Result<Option<Enrollment>> {
        self.get_enrollment_impl(class_id, learner_id).await
    }

    async fn list_class_members(&self, class_id: i64) -> Result<ClassMemberListResponse> {
        self.list_class_members_impl(class_id).await
    }

    // 资料模块
    async fn create_material(
        &self,
        class_id: i64,
        req: CreateMaterialRequest,
    ) -> Result<Material> {
        self.create_material_impl(class_id, req).await
    }

    async fn get_material_by_id(&self, material_id: i64) -> Result<Option<Material>> {
        self.get_material_by_id_impl(material_id).await
    }

    async fn list_materials(&self, class_id: i64) -> Result<Vec<Material>> {
        self.list_materials_impl(class_id).await
    }

    async fn delete_material(&self, material_id: i64) -> Result<bool> {
        self.delete_material_impl(material_id).await
    }

    // 作业模块
    async fn create_assignment(
        &self,
        class_id: i64,
        req: CreateAssignmentRequest,
    ) -> Result<Assignment> {
        self.create_assignment_impl(class_id, req).await
    }

    async fn get_assignment_by_id(&self, assignment_id: i64) -> Result<Option<Assignment>> {
        self.get_assignment_by_id_impl(assignment_id).await
    }

    async fn list_assignments(&self, class_id: i64) -> Result<Vec<Assignment>> {
        self.list_assignments_impl(class_id).await
    }

    async fn update_assignment_due_date(
        &self,
        assignment_id: i64,
        update: UpdateDueDateRequest,
    ) -> Result<Option<Assignment>> {
        self.update_assignment_due_date_impl(assignment_id, update)
            .await
    }

    async fn delete_assignment(&self, assignment_id: i64) -> Result<bool> {
        self.delete_assignment_impl(assignment_id).await
    }

    // 提交模块
    async fn upsert_submission(
        &self,
        assignment_id: i64,
        learner_id: i64,
        req: SubmitAssignmentRequest,
    ) -> Result<Option<(Submission, bool)>> {
        self.upsert_submission_impl(assignment_id, learner_id, req)
            .await
    }

    async fn get_submission(
        &self,
        assignment_id: i64,
        learner_id: i64,
    ) -> Result<Option<Submission>> {
        self.get_submission_impl(assignment_id, learner_id).await
    }

    async fn delete_submission_if_ungraded(
        &self,
        assignment_id: i64,
        learner_id: i64,
    ) -> Result<bool> {
        self.delete_submission_if_ungraded_impl(assignment_id, learner_id)
            .await
    }

    async fn set_grade(
        &self,
        submission_id: i64,
        grade: f64,
        feedback: Option<String>,
    ) -> Result<Option<Submission>> {
        self.set_grade_impl(submission_id, grade, feedback).await
    }

    async fn list_submissions(&self, assignment_id: i64) -> Result<SubmissionListResponse> {
        self.list_submissions_impl(assignment_id).await
    }

    // 文件模块
    async fn create_file_record(
        &self,
        download_token: &str,
        file_name: &str,
        stored_name: &str,
        file_size: i64,
        file_type: &str,
        user_id: i64,
    ) -> Result<File> {
        self.create_file_record_impl(
            download_token,
            file_name,
            stored_name,
            file_size,
            file_type,
            user_id,
        )
        .await
    }

    async fn get_file_by_token(&self, token: &str) -> Result<Option<File>> {
        self.get_file_by_token_impl(token).await
    }

    // 统计模块
    async fn health_snapshot(&self) -> Result<HealthResponse> {
        self.health_snapshot_impl().await
    }

    async fn instructor_stats(&self, owner_id: i64) -> Result<InstructorStatsResponse> {
        self.instructor_stats_impl(owner_id).await
    }

    async fn learner_stats(&self, learner_id: i64) -> Result<LearnerStatsResponse> {
        self.learner_stats_impl(learner_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::assignments::requests::CreateAssignmentRequest;
    use crate::models::classes::requests::CreateClassRequest;
    use crate::models::materials::requests::CreateMaterialRequest;
    use crate::models::submissions::requests::SubmitAssignmentRequest;
    use crate::models::users::{entities::UserRole, requests::CreateUserParams};
    use chrono::{Duration, Utc};

    async fn memory_storage() -> SeaOrmStorage {
        // 内存库限制单连接，多连接会各自拿到独立的空库
        let mut opt = ConnectOptions::new("sqlite::memory:");
        opt.max_connections(1).sqlx_logging(false);

        let db = Database::connect(opt).await.expect("内存数据库连接失败");
        Migrator::up(&db, None).await.expect("数据库迁移失败");
        SeaOrmStorage { db }
    }

    async fn seed_user(storage: &SeaOrmStorage, email: &str, role: UserRole) -> i64 {
        storage
            .create_user_impl(CreateUserParams {
                email: email.to_string(),
                password_hash: "$argon2id$test".to_string(),
                first_name: "Test".to_string(),
                last_name: "User".to_string(),
                role,
            })
            .await
            .expect("创建用户失败")
            .id
    }

    async fn seed_class(storage: &SeaOrmStorage, owner_id: i64, name: &str) -> i64 {
        storage
            .create_class_impl(
                owner_id,
                CreateClassRequest {
                    name: name.to_string(),
                    description: None,
                },
            )
            .await
            .expect("创建班级失败")
            .id
    }

    async fn seed_assignment(storage: &SeaOrmStorage, class_id: i64) -> i64 {
        storage
            .create_assignment_impl(
                class_id,
                CreateAssignmentRequest {
                    title: "Problem set 1".to_string(),
                    description: None,
                    due_date: Utc::now() + Duration::days(7),
                    points: 100,
                    attachments: vec![],
                },
            )
            .await
            .expect("创建作业失败")
            .id
    }

    fn submit_req(content: &str) -> SubmitAssignmentRequest {
        SubmitAssignmentRequest {
            content: content.to_string(),
            attachments: vec![],
        }
    }

    #[tokio::test]
    async fn test_resubmit_updates_in_place() {
        let storage = memory_storage().await;
        let instructor = seed_user(&storage, "instructor@example.com", UserRole::Instructor).await;
        let learner = seed_user(&storage, "learner@example.com", UserRole::Learner).await;
        let class_id = seed_class(&storage, instructor, "MATH01").await;
        let assignment_id = seed_assignment(&storage, class_id).await;

        let (first, created) = storage
            .upsert_submission_impl(assignment_id, learner, submit_req("draft"))
            .await
            .expect("提交失败")
            .expect("未评分提交不应被拒绝");
        assert!(created);

        let (second, created) = storage
            .upsert_submission_impl(assignment_id, learner, submit_req("final answer"))
            .await
            .expect("重交失败")
            .expect("未评分重交不应被拒绝");

        // 覆盖同一行，不产生第二条记录
        assert!(!created);
        assert_eq!(second.id, first.id);
        assert_eq!(second.content, "final answer");

        let listing = storage
            .list_submissions_impl(assignment_id)
            .await
            .expect("查询提交列表失败");
        assert_eq!(listing.total, 1);
    }

    #[tokio::test]
    async fn test_graded_submission_refuses_overwrite_and_withdraw() {
        let storage = memory_storage().await;
        let instructor = seed_user(&storage, "instructor@example.com", UserRole::Instructor).await;
        let learner = seed_user(&storage, "learner@example.com", UserRole::Learner).await;
        let class_id = seed_class(&storage, instructor, "MATH01").await;
        let assignment_id = seed_assignment(&storage, class_id).await;

        let (submission, _) = storage
            .upsert_submission_impl(assignment_id, learner, submit_req("my answer"))
            .await
            .expect("提交失败")
            .expect("未评分提交不应被拒绝");

        storage
            .set_grade_impl(submission.id, 87.5, Some("well done".to_string()))
            .await
            .expect("评分失败")
            .expect("已有提交的评分不应失败");

        // 已评分后重交被拒绝，原内容与成绩保持不变
        let refused = storage
            .upsert_submission_impl(assignment_id, learner, submit_req("overwrite attempt"))
            .await
            .expect("重交查询失败");
        assert!(refused.is_none());

        // 已评分后撤回被拒绝，记录保留
        let withdrawn = storage
            .delete_submission_if_ungraded_impl(assignment_id, learner)
            .await
            .expect("撤回失败");
        assert!(!withdrawn);

        let saved = storage
            .get_submission_impl(assignment_id, learner)
            .await
            .expect("查询提交失败")
            .expect("已评分提交不应被删除");
        assert_eq!(saved.content, "my answer");
        assert_eq!(saved.grade, Some(87.5));
    }

    #[tokio::test]
    async fn test_withdraw_removes_ungraded_submission() {
        let storage = memory_storage().await;
        let instructor = seed_user(&storage, "instructor@example.com", UserRole::Instructor).await;
        let learner = seed_user(&storage, "learner@example.com", UserRole::Learner).await;
        let class_id = seed_class(&storage, instructor, "MATH01").await;
        let assignment_id = seed_assignment(&storage, class_id).await;

        storage
            .upsert_submission_impl(assignment_id, learner, submit_req("my answer"))
            .await
            .expect("提交失败")
            .expect("未评分提交不应被拒绝");

        let withdrawn = storage
            .delete_submission_if_ungraded_impl(assignment_id, learner)
            .await
            .expect("撤回失败");
        assert!(withdrawn);

        let remaining = storage
            .get_submission_impl(assignment_id, learner)
            .await
            .expect("查询提交失败");
        assert!(remaining.is_none());
    }

    #[tokio::test]
    async fn test_delete_class_cascades_all_children() {
        let storage = memory_storage().await;
        let instructor = seed_user(&storage, "instructor@example.com", UserRole::Instructor).await;
        let learner = seed_user(&storage, "learner@example.com", UserRole::Learner).await;
        let class_id = seed_class(&storage, instructor, "MATH01").await;
        let assignment_id = seed_assignment(&storage, class_id).await;

        storage
            .create_enrollment_impl(class_id, learner)
            .await
            .expect("加入班级失败");
        storage
            .create_material_impl(
                class_id,
                CreateMaterialRequest {
                    title: "Lecture notes".to_string(),
                    description: None,
                    deadline: None,
                    resource_link: None,
                    attachments: vec![],
                },
            )
            .await
            .expect("创建资料失败");
        storage
            .upsert_submission_impl(assignment_id, learner, submit_req("my answer"))
            .await
            .expect("提交失败")
            .expect("未评分提交不应被拒绝");

        let members = storage
            .list_class_members_impl(class_id)
            .await
            .expect("查询班级成员失败");
        assert_eq!(members.total, 1);
        assert_eq!(members.items[0].email, "learner@example.com");
        assert_eq!(members.items[0].display_name, "Test User");

        let deleted = storage.delete_class_impl(class_id).await.expect("删除班级失败");
        assert!(deleted);

        assert!(
            storage
                .get_class_by_id_impl(class_id)
                .await
                .expect("查询班级失败")
                .is_none()
        );
        assert!(
            storage
                .get_enrollment_impl(class_id, learner)
                .await
                .expect("查询选课记录失败")
                .is_none()
        );
        assert!(
            storage
                .list_materials_impl(class_id)
                .await
                .expect("查询资料失败")
                .is_empty()
        );
        assert!(
            storage
                .list_assignments_impl(class_id)
                .await
                .expect("查询作业失败")
                .is_empty()
        );
        assert!(
            storage
                .get_submission_impl(assignment_id, learner)
                .await
                .expect("查询提交失败")
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_delete_assignment_cascades_submissions() {
        let storage = memory_storage().await;
        let instructor = seed_user(&storage, "instructor@example.com", UserRole::Instructor).await;
        let learner = seed_user(&storage, "learner@example.com", UserRole::Learner).await;
        let class_id = seed_class(&storage, instructor, "MATH01").await;
        let assignment_id = seed_assignment(&storage, class_id).await;

        storage
            .upsert_submission_impl(assignment_id, learner, submit_req("my answer"))
            .await
            .expect("提交失败")
            .expect("未评分提交不应被拒绝");

        let deleted = storage
            .delete_assignment_impl(assignment_id)
            .await
            .expect("删除作业失败");
        assert!(deleted);

        assert!(
            storage
                .get_submission_impl(assignment_id, learner)
                .await
                .expect("查询提交失败")
                .is_none()
        );
        // 班级本身不受影响
        assert!(
            storage
                .get_class_by_id_impl(class_id)
                .await
                .expect("查询班级失败")
                .is_some()
        );
    }
}
