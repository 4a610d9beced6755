mod article;
mod user;

pub use self::{
    article::{Article, ELLIPSIS_LEN, NewArticle, create_ellipsis},
    user::{NewUser, ProfileUpdate, User},
};
