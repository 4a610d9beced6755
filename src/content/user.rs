use chrono::{DateTime, Local};
use serde::Deserialize;
use uuid::Uuid;

/// 用户记录
///
/// 注册时由外部流程创建，之后只会被资料更新接口修改。
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    /// 个人简介
    pub bio: Option<String>,
    /// 头像地址
    pub image: Option<String>,
    pub created_at: DateTime<Local>,
    pub updated_at: DateTime<Local>,
}

/// 注册时写入的用户信息
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
}

impl NewUser {
    pub fn new(username: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
        }
    }
}

/// 资料的部分更新
///
/// 未提供的字段保持不变，未知字段忽略。
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileUpdate {
    pub bio: Option<String>,
    pub image: Option<String>,
}

impl ProfileUpdate {
    /// 将更新应用到已有记录上
    pub fn apply(&self, user: &mut User) {
        if let Some(bio) = &self.bio {
            user.bio = Some(bio.clone());
        }
        if let Some(image) = &self.image {
            user.image = Some(image.clone());
        }
    }
}
