//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，支持错误代码和类型名称。

use std::fmt;

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - message() 方法 - 返回错误详情
/// - 便捷构造函数
macro_rules! define_codelab_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone)]
        pub enum CodelabError {
            $($variant(String),)*
        }

        impl CodelabError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(CodelabError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(CodelabError::$variant(_) => $type_name,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(CodelabError::$variant(msg) => msg,)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl CodelabError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        CodelabError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_codelab_errors! {
    DatabaseConfig("E001", "Database Configuration Error"),
    DatabaseConnection("E002", "Database Connection Error"),
    DatabaseOperation("E003", "Database Operation Error"),
    FileOperation("E004", "File Operation Error"),
    Validation("E005", "Validation Error"),
    NotFound("E006", "Resource Not Found"),
    Serialization("E007", "Serialization Error"),
    BlobStore("E008", "Blob Store Error"),
    BlobStorePluginNotFound("E009", "Blob Store Plugin Not Found"),
    FeedbackProvider("E010", "Feedback Provider Error"),
    Upstream("E011", "Upstream Request Error"),
    Authorization("E012", "Authorization Error"),
    BlobTooLarge("E013", "Blob Too Large"),
}

impl CodelabError {
    /// 格式化为彩色输出（用于开发环境）
    #[cfg(debug_assertions)]
    pub fn format_colored(&self) -> String {
        format!(
            "\x1b[1;31m[ERROR]\x1b[0m \x1b[33m{}\x1b[0m \x1b[31m{}\x1b[0m\n  {}",
            self.code(),
            self.error_type(),
            self.message()
        )
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for CodelabError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for CodelabError {}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for CodelabError {
    fn from(err: sea_orm::DbErr) -> Self {
        CodelabError::DatabaseOperation(err.to_string())
    }
}

impl From<std::io::Error> for CodelabError {
    fn from(err: std::io::Error) -> Self {
        CodelabError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for CodelabError {
    fn from(err: serde_json::Error) -> Self {
        CodelabError::Serialization(err.to_string())
    }
}

impl From<reqwest::Error> for CodelabError {
    fn from(err: reqwest::Error) -> Self {
        CodelabError::Upstream(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, CodelabError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(CodelabError::database_config("test").code(), "E001");
        assert_eq!(CodelabError::validation("test").code(), "E005");
        assert_eq!(CodelabError::blob_store("test").code(), "E008");
        assert_eq!(CodelabError::authorization("test").code(), "E012");
    }

    #[test]
    fn test_error_types() {
        assert_eq!(
            CodelabError::blob_store_plugin_not_found("test").error_type(),
            "Blob Store Plugin Not Found"
        );
        assert_eq!(
            CodelabError::validation("test").error_type(),
            "Validation Error"
        );
    }

    #[test]
    fn test_error_message() {
        let err = CodelabError::validation("Invalid input");
        assert_eq!(err.message(), "Invalid input");
    }

    #[test]
    fn test_format_simple() {
        let err = CodelabError::feedback_provider("timed out");
        let formatted = err.format_simple();
        assert!(formatted.contains("Feedback Provider Error"));
        assert!(formatted.contains("timed out"));
    }

    #[test]
    fn test_from_io_error() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing blob");
        let err: CodelabError = io.into();
        assert_eq!(err.code(), "E004");
        assert!(err.message().contains("missing blob"));
    }
}
