use std::sync::Arc;

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

use crate::errors::Result;

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 用户管理方法
    // 创建用户
    async fn create_user(&self, params: CreateUserParams) -> Result<User>;
    // 通过ID获取用户信息
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;
    // 通过邮箱获取用户信息
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;
    // 更新用户最后登录时间
    async fn update_last_login(&self, id: i64) -> Result<bool>;
    // 更新用户密码散列
    async fn update_password(&self, id: i64, password_hash: &str) -> Result<bool>;

    /// 班级管理方法
    // 创建班级（加入码自动生成，冲突时重试）
    async fn create_class(&self, owner_id: i64, req: CreateClassRequest) -> Result<Class>;
    // 通过ID获取班级信息
    async fn get_class_by_id(&self, class_id: i64) -> Result<Option<Class>>;
    // 通过加入码获取班级信息
    async fn get_class_by_code(&self, code: &str) -> Result<Option<Class>>;
    // 列出教师拥有的班级
    async fn list_owned_classes(
        &self,
        owner_id: i64,
        query: ClassListQuery,
    ) -> Result<ClassListResponse>;
    // 列出学员加入的班级
    async fn list_enrolled_classes(
        &self,
        learner_id: i64,
        query: ClassListQuery,
    ) -> Result<ClassListResponse>;
    // 更新班级信息
    async fn update_class(
        &self,
        class_id: i64,
        update: UpdateClassRequest,
    ) -> Result<Option<Class>>;
    // 归档/取消归档班级
    async fn set_class_archived(&self, class_id: i64, archived: bool) -> Result<Option<Class>>;
    // 删除班级（事务内级联删除选课、资料、作业与提交）
    async fn delete_class(&self, class_id: i64) -> Result<bool>;

    /// 选课管理方法
    // 学员加入班级
    async fn create_enrollment(&self, class_id: i64, learner_id: i64) -> Result<Enrollment>;
    // 学员退出/被移出班级
    async fn delete_enrollment(&self, class_id: i64, learner_id: i64) -> Result<bool>;
    // 获取学员在班级中的选课记录
    async fn get_enrollment(&self, class_id: i64, learner_id: i64) -> Result<Option<Enrollment>>;
    // 列出班级成员（含学员展示信息）
    async fn list_class_members(&self, class_id: i64) -> Result<ClassMemberListResponse>;

    /// 资料管理方法
    // 发布资料
    async fn create_material(&self, class_id: i64, req: CreateMaterialRequest)
    -> Result<Material>;
    // 通过ID获取资料
    async fn get_material_by_id(&self, material_id: i64) -> Result<Option<Material>>;
    // 列出班级资料
    async fn list_materials(&self, class_id: i64) -> Result<Vec<Material>>;
    // 删除资料
    async fn delete_material(&self, material_id: i64) -> Result<bool>;

    /// 作业管理方法
    // 布置作业
    async fn create_assignment(
        &self,
        class_id: i64,
        req: CreateAssignmentRequest,
    ) -> Result<Assignment>;
    // 通过ID获取作业
    async fn get_assignment_by_id(&self, assignment_id: i64) -> Result<Option<Assignment>>;
    // 列出班级作业
    async fn list_assignments(&self, class_id: i64) -> Result<Vec<Assignment>>;
    // 修改作业截止时间
    async fn update_assignment_due_date(
        &self,
        assignment_id: i64,
        update: UpdateDueDateRequest,
    ) -> Result<Option<Assignment>>;
    // 删除作业（事务内级联删除提交）
    async fn delete_assignment(&self, assignment_id: i64) -> Result<bool>;

    /// 提交管理方法
    // 提交/重交作业；返回 None 表示记录已评分、拒绝覆盖
    async fn upsert_submission(
        &self,
        assignment_id: i64,
        learner_id: i64,
        req: SubmitAssignmentRequest,
    ) -> Result<Option<(Submission, bool)>>;
    // 获取学员在某作业下的提交
    async fn get_submission(
        &self,
        assignment_id: i64,
        learner_id: i64,
    ) -> Result<Option<Submission>>;
    // 撤回未评分的提交；已评分的记录不会被删除
    async fn delete_submission_if_ungraded(
        &self,
        assignment_id: i64,
        learner_id: i64,
    ) -> Result<bool>;
    // 评分/改分
    async fn set_grade(
        &self,
        submission_id: i64,
        grade: f64,
        feedback: Option<String>,
    ) -> Result<Option<Submission>>;
    // 列出作业下的全部提交（教师视角，含学员信息）
    async fn list_submissions(&self, assignment_id: i64) -> Result<SubmissionListResponse>;

    /// 文件管理方法
    // 记录上传的文件元数据
    async fn create_file_record(
        &self,
        download_token: &str,
        file_name: &str,
        stored_name: &str,
        file_size: i64,
        file_type: &str,
        user_id: i64,
    ) -> Result<File>;
    // 通过唯一 token 获取文件信息
    async fn get_file_by_token(&self, token: &str) -> Result<Option<File>>;

    /// 统计方法
    // 健康检查计数
    async fn health_snapshot(&self) -> Result<HealthResponse>;
    // 教师工作台统计
    async fn instructor_stats(&self, owner_id: i64) -> Result<InstructorStatsResponse>;
    // 学员工作台统计
    async fn learner_stats(&self, learner_id: i64) -> Result<LearnerStatsResponse>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
