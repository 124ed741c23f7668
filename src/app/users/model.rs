//! 用户数据模型

use serde::{de, Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct User {
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "John Doe")]
    pub name: String,
    /// 只有通过创建接口生成的用户才有年龄
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<i64>,
}

impl User {
    pub fn seeded(id: i64, name: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            age: None,
        }
    }
}

/// 创建用户请求，字段是否存在由处理器检查
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CreateUserRequest {
    #[schema(example = "Alice")]
    pub name: Option<String>,
    /// `30` 和 `30.0` 等价，带小数部分的值视为类型错误
    #[schema(example = 30)]
    #[serde(default, deserialize_with = "whole_number")]
    pub age: Option<i64>,
}

fn whole_number<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(number) = Option::<serde_json::Number>::deserialize(deserializer)? else {
        return Ok(None);
    };

    if let Some(value) = number.as_i64() {
        return Ok(Some(value));
    }

    match number.as_f64() {
        Some(value) if value.fract() == 0.0 && value.abs() < i64::MAX as f64 => {
            Ok(Some(value as i64))
        }
        _ => Err(de::Error::custom(format!("age 必须是整数，实际为 {}", number))),
    }
}

impl CreateUserRequest {
    /// 取出必填字段；空名字和 0 岁都视为缺失
    pub fn required_fields(self) -> Option<(String, i64)> {
        let name = self.name.filter(|name| !name.is_empty())?;
        let age = self.age.filter(|age| *age != 0)?;
        Some((name, age))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateUserResponse {
    #[schema(example = "User created successfully")]
    pub message: String,
    pub user: User,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_user_omits_age() {
        let json = serde_json::to_value(User::seeded(1, "John Doe")).unwrap();
        assert_eq!(json, serde_json::json!({ "id": 1, "name": "John Doe" }));
    }

    #[test]
    fn test_required_fields() {
        let full = CreateUserRequest {
            name: Some("Alice".into()),
            age: Some(30),
        };
        assert_eq!(full.required_fields(), Some(("Alice".to_string(), 30)));

        let no_age = CreateUserRequest {
            name: Some("Bob".into()),
            age: None,
        };
        assert_eq!(no_age.required_fields(), None);

        let empty_name = CreateUserRequest {
            name: Some(String::new()),
            age: Some(20),
        };
        assert_eq!(empty_name.required_fields(), None);

        let zero_age = CreateUserRequest {
            name: Some("Carol".into()),
            age: Some(0),
        };
        assert_eq!(zero_age.required_fields(), None);
    }

    #[test]
    fn test_age_accepts_whole_floats() {
        let request: CreateUserRequest =
            serde_json::from_str(r#"{"name":"Alice","age":30.0}"#).unwrap();
        assert_eq!(request.age, Some(30));

        let request: CreateUserRequest = serde_json::from_str(r#"{"name":"Alice"}"#).unwrap();
        assert_eq!(request.age, None);

        let request: CreateUserRequest =
            serde_json::from_str(r#"{"name":"Alice","age":null}"#).unwrap();
        assert_eq!(request.age, None);

        assert!(serde_json::from_str::<CreateUserRequest>(r#"{"age":30.5}"#).is_err());
        assert!(serde_json::from_str::<CreateUserRequest>(r#"{"age":"30"}"#).is_err());
    }
}
