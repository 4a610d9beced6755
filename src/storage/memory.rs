use std::{
    collections::HashMap,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
};

use chrono::Local;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{ArticleStore, ProfileStore};
use crate::{
    content::{Article, NewArticle, NewUser, ProfileUpdate, User},
    error::{Error, Result},
};

#[derive(Debug)]
struct Tables {
    users: HashMap<Uuid, User>,
    /// `None` 表示文章表已被删除
    articles: Option<HashMap<Uuid, Article>>,
}

impl Default for Tables {
    fn default() -> Self {
        Self {
            users: HashMap::new(),
            articles: Some(HashMap::new()),
        }
    }
}

/// 基于内存的存储实现
///
/// 与 [`DBPool`](super::DBPool) 遵守同一套接口约定，用于测试和本地运行。
/// 通过 [`MemoryStore::set_unavailable`] 可以模拟存储故障，此时所有操作都返回错误。
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
    unavailable: Arc<AtomicBool>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 切换故障模式
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(Error::StoreUnavailable("memory store switched off"));
        }
        Ok(())
    }
}

const ARTICLES_DROPPED: &str = "relation \"articles\" does not exist";

impl ProfileStore for MemoryStore {
    async fn find_user(&self, id: Uuid) -> Result<Option<User>> {
        self.check_available()?;
        Ok(self.tables.read().await.users.get(&id).cloned())
    }

    async fn update_profile(&self, id: Uuid, update: &ProfileUpdate) -> Result<Option<User>> {
        self.check_available()?;
        let mut tables = self.tables.write().await;
        let Some(user) = tables.users.get_mut(&id) else {
            return Ok(None);
        };
        update.apply(user);
        user.updated_at = Local::now();
        Ok(Some(user.clone()))
    }

    async fn create_user(&self, new_user: &NewUser) -> Result<User> {
        self.check_available()?;
        let mut tables = self.tables.write().await;

        let taken = tables
            .users
            .values()
            .any(|u| u.username == new_user.username || u.email == new_user.email);
        if taken {
            return Err(Error::InvalidInput("username or email already taken"));
        }

        let now = Local::now();
        let user = User {
            id: Uuid::new_v4(),
            username: new_user.username.clone(),
            email: new_user.email.clone(),
            bio: None,
            image: None,
            created_at: now,
            updated_at: now,
        };
        tables.users.insert(user.id, user.clone());
        Ok(user)
    }
}

impl ArticleStore for MemoryStore {
    async fn create_article(&self, new: &NewArticle) -> Result<Article> {
        self.check_available()?;
        let mut tables = self.tables.write().await;
        let Tables { users, articles } = &mut *tables;
        let articles = articles
            .as_mut()
            .ok_or(Error::StoreUnavailable(ARTICLES_DROPPED))?;

        // 作者必须存在，与 articles.user_id 的外键约束一致
        if !users.contains_key(&new.user_id) {
            return Err(Error::NotFound);
        }

        let article = Article::from_new(new);
        articles.insert(article.id, article.clone());
        Ok(article)
    }

    async fn find_article(&self, id: Uuid) -> Result<Option<Article>> {
        self.check_available()?;
        let tables = self.tables.read().await;
        let articles = tables
            .articles
            .as_ref()
            .ok_or(Error::StoreUnavailable(ARTICLES_DROPPED))?;
        Ok(articles.get(&id).cloned())
    }

    async fn drop_articles(&self) -> Result<()> {
        self.check_available()?;
        self.tables.write().await.articles = None;
        Ok(())
    }
}
