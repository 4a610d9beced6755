/// 应用程序上下文
///
/// [`AppState`] 持有注入的存储实现，所有处理函数通过它访问数据。
#[derive(Clone)]
pub struct AppState<S> {
    store: S,
}

impl<S> AppState<S> {
    /// 创建一个新的 [`AppState`] 实例
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// 获取存储对象
    pub fn store(&self) -> &S {
        &self.store
    }
}
