//! 用户存储服务
//!
//! 用户列表只存在于进程内存中，启动时写入两条种子数据，之后只追加不修改。

use std::fmt;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use rand::Rng;
use tracing::{debug, warn};

use super::model::User;
use crate::core::config::{IdStrategyKind, LookupPolicy};
use crate::core::error::CoreError;

/// 随机 ID 的上界（不含）
pub const RANDOM_ID_UPPER: i64 = 1000;

/// 旧版查询策略下唯一可查的用户 ID
pub const LEGACY_LOOKUP_ID: i64 = 1;

/// 新用户 ID 分配策略
pub trait IdStrategy: Send + Sync + fmt::Debug {
    fn next_id(&self) -> i64;
}

/// 在 [0, 1000) 内随机取值，不与已有 ID 比对，可能重复
#[derive(Debug, Default)]
pub struct RandomIds;

impl IdStrategy for RandomIds {
    fn next_id(&self) -> i64 {
        rand::thread_rng().gen_range(0..RANDOM_ID_UPPER)
    }
}

/// 单调递增计数器，从种子数据之后的 3 开始
#[derive(Debug)]
pub struct SequentialIds {
    next: AtomicI64,
}

impl SequentialIds {
    pub fn starting_at(first: i64) -> Self {
        Self {
            next: AtomicI64::new(first),
        }
    }
}

impl Default for SequentialIds {
    fn default() -> Self {
        Self::starting_at(3)
    }
}

impl IdStrategy for SequentialIds {
    fn next_id(&self) -> i64 {
        self.next.fetch_add(1, Ordering::Relaxed)
    }
}

/// 根据配置构造 ID 策略
pub fn id_strategy(kind: IdStrategyKind) -> Arc<dyn IdStrategy> {
    match kind {
        IdStrategyKind::Random => Arc::new(RandomIds),
        IdStrategyKind::Sequential => Arc::new(SequentialIds::default()),
    }
}

impl LookupPolicy {
    /// 该 ID 是否允许被 `GET /users/{id}` 查到
    pub fn admits(self, id: i64) -> bool {
        match self {
            LookupPolicy::Legacy => id == LEGACY_LOOKUP_ID,
            LookupPolicy::Scan => true,
        }
    }
}

#[derive(Clone)]
pub struct UserService {
    users: Arc<RwLock<Vec<User>>>,
    ids: Arc<dyn IdStrategy>,
}

impl UserService {
    pub fn new() -> Self {
        Self::with_id_strategy(Arc::new(RandomIds))
    }

    pub fn with_id_strategy(ids: Arc<dyn IdStrategy>) -> Self {
        let seeds = vec![User::seeded(1, "John Doe"), User::seeded(2, "Jane Doe")];
        Self {
            users: Arc::new(RwLock::new(seeds)),
            ids,
        }
    }

    /// 按插入顺序返回全部用户
    pub fn list_all(&self) -> Result<Vec<User>, CoreError> {
        let users = self.users.read().map_err(poisoned)?;
        Ok(users.clone())
    }

    /// 线性扫描，返回第一个匹配的用户
    pub fn find_by_id(&self, id: i64) -> Result<User, CoreError> {
        let users = self.users.read().map_err(poisoned)?;
        users
            .iter()
            .find(|user| user.id == id)
            .cloned()
            .ok_or_else(|| CoreError::NotFound("User not found".to_string()))
    }

    pub fn create_user(&self, name: String, age: i64) -> Result<User, CoreError> {
        let user = User {
            id: self.ids.next_id(),
            name,
            age: Some(age),
        };

        let mut users = self.users.write().map_err(poisoned)?;
        if users.iter().any(|existing| existing.id == user.id) {
            warn!(id = user.id, "新用户 ID 与已有用户重复");
        }
        users.push(user.clone());
        debug!(id = user.id, total = users.len(), "用户已追加");

        Ok(user)
    }
}

impl Default for UserService {
    fn default() -> Self {
        Self::new()
    }
}

fn poisoned<T>(_: PoisonError<T>) -> CoreError {
    CoreError::Internal("用户存储锁已中毒".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 固定返回同一个 ID，用来制造碰撞
    #[derive(Debug)]
    struct FixedId(i64);

    impl IdStrategy for FixedId {
        fn next_id(&self) -> i64 {
            self.0
        }
    }

    #[test]
    fn test_seeded_users() {
        let service = UserService::new();
        let users = service.list_all().unwrap();
        assert_eq!(
            users,
            vec![User::seeded(1, "John Doe"), User::seeded(2, "Jane Doe")]
        );
    }

    #[test]
    fn test_find_by_id() {
        let service = UserService::new();
        assert_eq!(service.find_by_id(2).unwrap().name, "Jane Doe");
        assert!(matches!(
            service.find_by_id(99),
            Err(CoreError::NotFound(msg)) if msg == "User not found"
        ));
    }

    #[test]
    fn test_create_appends_in_order() {
        let service = UserService::with_id_strategy(Arc::new(SequentialIds::default()));
        let alice = service.create_user("Alice".into(), 30).unwrap();
        let bob = service.create_user("Bob".into(), 41).unwrap();

        assert_eq!((alice.id, bob.id), (3, 4));
        assert_eq!(alice.age, Some(30));

        let names: Vec<_> = service
            .list_all()
            .unwrap()
            .into_iter()
            .map(|user| user.name)
            .collect();
        assert_eq!(names, ["John Doe", "Jane Doe", "Alice", "Bob"]);
    }

    #[test]
    fn test_random_ids_in_range() {
        let ids = RandomIds;
        for _ in 0..500 {
            let id = ids.next_id();
            assert!((0..RANDOM_ID_UPPER).contains(&id));
        }
    }

    #[test]
    fn test_colliding_ids_are_accepted() {
        // 随机策略不做碰撞检查，存储也不拒绝重复 ID
        let service = UserService::with_id_strategy(Arc::new(FixedId(1)));
        let created = service.create_user("Mallory".into(), 25).unwrap();
        assert_eq!(created.id, 1);

        let users = service.list_all().unwrap();
        assert_eq!(users.iter().filter(|user| user.id == 1).count(), 2);
        // 线性扫描先命中种子用户
        assert_eq!(service.find_by_id(1).unwrap().name, "John Doe");
    }

    #[test]
    fn test_clones_share_storage() {
        let service = UserService::new();
        let handle = service.clone();
        handle.create_user("Alice".into(), 30).unwrap();
        assert_eq!(service.list_all().unwrap().len(), 3);
    }

    #[test]
    fn test_separate_instances_are_isolated() {
        let first = UserService::new();
        let second = UserService::new();
        first.create_user("Alice".into(), 30).unwrap();
        assert_eq!(second.list_all().unwrap().len(), 2);
    }

    #[test]
    fn test_poisoned_lock_is_internal_error() {
        let service = UserService::new();
        let users = Arc::clone(&service.users);
        let _ = std::thread::spawn(move || {
            let _guard = users.write().unwrap();
            panic!("持锁时崩溃");
        })
        .join();

        assert!(matches!(service.list_all(), Err(CoreError::Internal(_))));
        assert!(matches!(
            service.create_user("Alice".into(), 30),
            Err(CoreError::Internal(_))
        ));
    }

    #[test]
    fn test_lookup_policy() {
        assert!(LookupPolicy::Legacy.admits(1));
        assert!(!LookupPolicy::Legacy.admits(2));
        assert!(LookupPolicy::Scan.admits(2));
    }
}
