use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::materials::requests::CreateMaterialRequest;
use crate::models::users::entities::UserRole;
use crate::services::MaterialService;
use crate::utils::{SafeClassIdI64, SafeMaterialIdI64};

// 懒加载的全局 MaterialService 实例
static MATERIAL_SERVICE: Lazy<MaterialService> = Lazy::new(MaterialService::new_lazy);

// HTTP处理程序
pub async fn create_material(
    req: HttpRequest,
    class_id: SafeClassIdI64,
    material_data: web::Json<CreateMaterialRequest>,
) -> ActixResult<HttpResponse> {
    MATERIAL_SERVICE
        .create_material(&req, class_id.0, material_data.into_inner())
        .await
}

pub async fn list_materials(
    req: HttpRequest,
    class_id: SafeClassIdI64,
) -> ActixResult<HttpResponse> {
    MATERIAL_SERVICE.list_materials(&req, class_id.0).await
}

pub async fn delete_material(
    req: HttpRequest,
    class_id: SafeClassIdI64,
    material_id: SafeMaterialIdI64,
) -> ActixResult<HttpResponse> {
    MATERIAL_SERVICE
        .delete_material(&req, class_id.0, material_id.0)
        .await
}

// 配置路由
pub fn configure_materials_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/classes/{class_id}/materials")
            .wrap(middlewares::RequireJWT)
            .service(
                // 班级内成员均可查看资料列表
                web::resource("")
                    .route(web::get().to(list_materials))
                    .route(
                        web::post()
                            .to(create_material)
                            // 仅拥有者可以发布资料
                            .wrap(middlewares::RequireRole::new_any(
                                UserRole::instructor_roles(),
                            )),
                    ),
            )
            .service(
                web::resource("/{material_id}").route(
                    web::delete()
                        .to(delete_material)
                        .wrap(middlewares::RequireRole::new_any(
                            UserRole::instructor_roles(),
                        )),
                ),
            ),
    );
}
