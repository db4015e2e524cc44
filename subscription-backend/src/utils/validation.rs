// src/utils/validation.rs

//! 共通バリデーション定数と関数
//!
//! DTO 間で共有するバリデーションルールをまとめる。

use validator::ValidationError;

/// サービス名の制約
pub mod service_name {
    pub const MIN_LENGTH: u64 = 1;
    pub const MAX_LENGTH: u64 = 255;
}

/// 月額の制約
pub mod price {
    pub const MIN: i32 = 0;
}

/// 文字列が空白のみでないかをチェック
pub fn validate_not_empty_or_whitespace(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("empty_or_whitespace");
        error.message = Some("Field cannot be empty or contain only whitespace".into());
        return Err(error);
    }
    Ok(())
}

/// サービス名のバリデーション
pub fn validate_service_name(name: &str) -> Result<(), ValidationError> {
    validate_not_empty_or_whitespace(name)?;

    // パスセグメントとして扱えない文字を拒否
    if name.contains('\0') || name.contains('\r') || name.contains('\n') || name.contains('/') {
        let mut error = ValidationError::new("invalid_characters");
        error.message = Some(
            "Service name cannot contain null, carriage return, newline, or slash characters"
                .into(),
        );
        return Err(error);
    }

    Ok(())
}
