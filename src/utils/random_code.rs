//! 班级加入码生成

use rand::Rng;

/// 加入码字符集：大写字母 + 数字
const CODE_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// 加入码长度
pub const CODE_LENGTH: usize = 6;

/// 生成一个 6 位班级加入码
///
/// 唯一性由调用方保证：存储层在唯一索引冲突时重新生成。
pub fn generate_class_code() -> String {
    let mut rng = rand::rng();
    (0..CODE_LENGTH)
        .map(|_| {
            let idx = rng.random_range(0..CODE_CHARSET.len());
            CODE_CHARSET[idx] as char
        })
        .collect()
}

/// 校验加入码格式
pub fn is_valid_class_code(code: &str) -> bool {
    code.len() == CODE_LENGTH
        && code
            .bytes()
            .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_format() {
        for _ in 0..100 {
            let code = generate_class_code();
            assert_eq!(code.len(), CODE_LENGTH);
            assert!(is_valid_class_code(&code), "invalid code: {code}");
        }
    }

    #[test]
    fn test_is_valid_class_code() {
        assert!(is_valid_class_code("A1B2C3"));
        assert!(is_valid_class_code("ZZZZZZ"));
        assert!(is_valid_class_code("000000"));
        assert!(!is_valid_class_code("a1b2c3")); // 小写
        assert!(!is_valid_class_code("A1B2C")); // 过短
        assert!(!is_valid_class_code("A1B2C34")); // 过长
        assert!(!is_valid_class_code("A1B2C!")); // 非法字符
    }
}
