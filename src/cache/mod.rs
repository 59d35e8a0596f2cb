//! 缓存层
//!
//! 提供统一的 ObjectCache 抽象，支持 Moka（内存）和 Redis 两种后端。
//! 后端通过 ctor 在进程启动时自注册到插件注册表。

pub mod object_cache;
pub mod register;
pub mod traits;

pub use traits::{CacheResult, ObjectCache};

/// 声明一个缓存插件并在进程启动时注册
///
/// 后端类型需要提供 `new() -> Result<Self, String>`。
#[macro_export]
macro_rules! declare_object_cache_plugin {
    ($name:literal, $cache_type:ident) => {
        paste::paste! {
            #[ctor::ctor]
            fn [<__register_object_cache_ $cache_type:snake>]() {
                let constructor: $crate::cache::register::ObjectCacheConstructor =
                    std::sync::Arc::new(|| {
                        Box::pin(async {
                            let cache = $cache_type::new()
                                .map_err($crate::errors::AcademyError::cache_connection)?;
                            Ok(Box::new(cache) as Box<dyn $crate::cache::ObjectCache>)
                        })
                    });
                $crate::cache::register::register_object_cache_plugin($name, constructor);
            }
        }
    };
}
