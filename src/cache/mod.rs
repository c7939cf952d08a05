//! 对象缓存层
//!
//! 通过构造器注册表实现可插拔的缓存后端（moka / redis）。
//! 后端在编译期通过 `declare_object_cache_plugin!` 注册，运行时按配置选择。

pub mod object_cache;
pub mod register;
pub mod traits;

pub use traits::{CacheResult, ObjectCache};

/// 注册一个缓存后端插件
///
/// 展开为一个 ctor 函数，在 main 之前把构造器写入注册表。
#[macro_export]
macro_rules! declare_object_cache_plugin {
    ($name:expr, $plugin:ident) => {
        ::paste::paste! {
            #[ctor::ctor]
            fn [<__register_object_cache_ $plugin:snake>]() {
                $crate::cache::register::register_object_cache_plugin(
                    $name,
                    ::std::sync::Arc::new(|| {
                        ::std::boxed::Box::pin(async {
                            let cache = $plugin::new()
                                .map_err($crate::errors::LearnSyncError::cache_connection)?;
                            Ok(::std::boxed::Box::new(cache)
                                as ::std::boxed::Box<dyn $crate::cache::ObjectCache>)
                        })
                            as $crate::cache::register::BoxedObjectCacheFuture
                    }),
                );
            }
        }
    };
}
