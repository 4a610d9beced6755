use chrono::{DateTime, Local};
use uuid::Uuid;

/// 摘要的最大字符数（按 Unicode 字符计）
pub const ELLIPSIS_LEN: usize = 150;

/// 根据正文生成摘要。
///
/// 正文不超过 [`ELLIPSIS_LEN`] 个字符时原样返回；否则截取前 [`ELLIPSIS_LEN`] 个字符，
/// 回退到最后一个空白处（避免截断单词），并追加 `...`。
///
/// ```
/// use haven::content::create_ellipsis;
///
/// assert_eq!(create_ellipsis("short body"), "short body");
/// assert!(create_ellipsis(&"word ".repeat(100)).ends_with("..."));
/// ```
pub fn create_ellipsis(body: &str) -> String {
    let Some((cut, _)) = body.char_indices().nth(ELLIPSIS_LEN) else {
        return body.to_string();
    };

    let prefix = &body[..cut];
    let at_boundary = body[cut..].starts_with(char::is_whitespace);

    let prefix = match prefix.rfind(char::is_whitespace) {
        Some(pos) if !at_boundary && pos > 0 => &prefix[..pos],
        _ => prefix,
    };

    format!("{}...", prefix.trim_end())
}

/// 创建文章时提交的字段
///
/// `description` 不在此处，它总是由 [`create_ellipsis`] 从正文派生。
#[derive(Debug, Clone, PartialEq)]
pub struct NewArticle {
    pub title: String,
    pub body: String,
    pub user_id: Uuid,
    pub category_id: i32,
    pub is_blacklisted: bool,
    pub is_published: bool,
}

impl NewArticle {
    pub fn new(
        title: impl Into<String>,
        body: impl Into<String>,
        user_id: Uuid,
        category_id: i32,
    ) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            user_id,
            category_id,
            is_blacklisted: false,
            is_published: false,
        }
    }

    /// 创建时派生的摘要
    pub fn description(&self) -> String {
        create_ellipsis(&self.body)
    }
}

/// 已持久化的文章
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Article {
    pub id: Uuid,
    pub title: String,
    pub body: String,
    pub description: String,
    pub user_id: Uuid,
    pub category_id: i32,
    pub is_blacklisted: bool,
    pub is_published: bool,
    pub created_at: DateTime<Local>,
    pub updated_at: DateTime<Local>,
}

impl Article {
    /// 由 [`NewArticle`] 生成一条新记录，`id` 与时间戳在此分配
    pub fn from_new(new: &NewArticle) -> Self {
        let now = Local::now();
        Self {
            id: Uuid::new_v4(),
            title: new.title.clone(),
            body: new.body.clone(),
            description: new.description(),
            user_id: new.user_id,
            category_id: new.category_id,
            is_blacklisted: new.is_blacklisted,
            is_published: new.is_published,
            created_at: now,
            updated_at: now,
        }
    }
}
