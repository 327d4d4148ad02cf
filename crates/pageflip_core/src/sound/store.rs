//! Category-to-sound resolution.
//!
//! # Responsibility
//! - Hold the built-in pools and the active custom sound set.
//! - Pick one resource per request under the configured selection policy.
//!
//! # Invariants
//! - `resolve` returns `None` iff both the custom and built-in pools are empty.
//! - Round-robin cursors are per category, shared across pool sources, and
//!   advance once per successful resolution.
//! - Custom pools are preserved in loader order (sorted by file name).

use crate::model::category::SoundCategory;
use crate::sound::builtin::BuiltinPools;
use crate::sound::resource::SoundResource;
use rand::Rng;

/// How one resource is picked from a non-empty pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionPolicy {
    /// `pool[cursor % len]`, then advance. Reproducible.
    #[default]
    RoundRobin,
    /// Uniform random index.
    Random,
}

/// Custom pools loaded from one vault folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomSoundSet {
    folder: String,
    pools: [Vec<SoundResource>; 3],
}

impl CustomSoundSet {
    pub fn new(folder: impl Into<String>) -> Self {
        Self {
            folder: folder.into(),
            pools: Default::default(),
        }
    }

    /// Folder path this set was loaded from.
    pub fn folder(&self) -> &str {
        &self.folder
    }

    pub fn push(&mut self, category: SoundCategory, resource: SoundResource) {
        self.pools[category.index()].push(resource);
    }

    pub fn pool(&self, category: SoundCategory) -> &[SoundResource] {
        &self.pools[category.index()]
    }

    /// Total resources across every category.
    pub fn len(&self) -> usize {
        self.pools.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Sound pool store consulted on every cue.
#[derive(Debug, Clone)]
pub struct SoundStore {
    builtin: BuiltinPools,
    custom: Option<CustomSoundSet>,
    cursors: [usize; 3],
    policy: SelectionPolicy,
}

impl Default for SoundStore {
    fn default() -> Self {
        Self::new(BuiltinPools::bundled())
    }
}

impl SoundStore {
    /// Creates a round-robin store over the given built-in pools.
    pub fn new(builtin: BuiltinPools) -> Self {
        Self {
            builtin,
            custom: None,
            cursors: [0; 3],
            policy: SelectionPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: SelectionPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> SelectionPolicy {
        self.policy
    }

    /// Resolves one playable resource for `category`.
    ///
    /// The custom pool wins when non-empty; otherwise the built-in pool is
    /// used. Returns `None` when both are empty.
    pub fn resolve(&mut self, category: SoundCategory) -> Option<SoundResource> {
        let custom = self
            .custom
            .as_ref()
            .map(|set| set.pool(category))
            .filter(|pool| !pool.is_empty());
        let pool = custom.unwrap_or_else(|| self.builtin.get(category));
        if pool.is_empty() {
            return None;
        }

        let index = match self.policy {
            SelectionPolicy::RoundRobin => {
                let cursor = &mut self.cursors[category.index()];
                let index = *cursor % pool.len();
                *cursor = cursor.wrapping_add(1);
                index
            }
            SelectionPolicy::Random => rand::thread_rng().gen_range(0..pool.len()),
        };
        pool.get(index).cloned()
    }

    /// Installs a freshly loaded custom set, replacing any previous one.
    pub fn install_custom(&mut self, set: CustomSoundSet) {
        self.custom = Some(set);
    }

    /// Drops the active custom set; built-in pools take over.
    pub fn clear_custom(&mut self) {
        self.custom = None;
    }

    pub fn custom(&self) -> Option<&CustomSoundSet> {
        self.custom.as_ref()
    }

    /// Folder of the active custom set, if any.
    pub fn custom_folder(&self) -> Option<&str> {
        self.custom.as_ref().map(CustomSoundSet::folder)
    }

    /// Clears custom sounds and rewinds every cursor.
    pub fn reset(&mut self) {
        self.custom = None;
        self.cursors = [0; 3];
    }
}

#[cfg(test)]
mod tests {
    use super::{CustomSoundSet, SelectionPolicy, SoundStore};
    use crate::model::category::SoundCategory;
    use crate::sound::builtin::BuiltinPools;
    use crate::sound::resource::{SoundResource, MIME_OGG, MIME_WAV};

    fn clip(tag: &str) -> SoundResource {
        SoundResource::from_bytes(MIME_WAV, tag.as_bytes())
    }

    fn custom_clip(tag: &str) -> SoundResource {
        SoundResource::from_bytes(MIME_OGG, tag.as_bytes())
    }

    fn builtin_abc() -> BuiltinPools {
        BuiltinPools::empty().with_pool(
            SoundCategory::PageFlip,
            vec![clip("a"), clip("b"), clip("c")],
        )
    }

    #[test]
    fn resolve_is_none_only_when_both_pools_are_empty() {
        let mut store = SoundStore::new(builtin_abc());
        assert!(store.resolve(SoundCategory::PageFlip).is_some());
        assert!(store.resolve(SoundCategory::NewNote).is_none());

        let mut set = CustomSoundSet::new("sounds");
        set.push(SoundCategory::NewNote, custom_clip("n1"));
        store.install_custom(set);
        assert!(store.resolve(SoundCategory::NewNote).is_some());
        assert!(store.resolve(SoundCategory::Checkbox).is_none());
    }

    #[test]
    fn round_robin_visits_each_element_once_in_order() {
        let mut store = SoundStore::new(builtin_abc());
        let picked: Vec<_> = (0..6)
            .map(|_| store.resolve(SoundCategory::PageFlip).expect("resolves"))
            .collect();
        assert_eq!(
            picked,
            vec![clip("a"), clip("b"), clip("c"), clip("a"), clip("b"), clip("c")]
        );
    }

    #[test]
    fn custom_pool_wins_and_cursor_is_shared_across_sources() {
        let mut store = SoundStore::new(builtin_abc());
        assert_eq!(store.resolve(SoundCategory::PageFlip), Some(clip("a")));

        let mut set = CustomSoundSet::new("sounds");
        set.push(SoundCategory::PageFlip, custom_clip("x"));
        set.push(SoundCategory::PageFlip, custom_clip("y"));
        store.install_custom(set);
        // cursor is now 1, so rotation continues instead of restarting
        assert_eq!(store.resolve(SoundCategory::PageFlip), Some(custom_clip("y")));
        assert_eq!(store.resolve(SoundCategory::PageFlip), Some(custom_clip("x")));

        store.clear_custom();
        assert_eq!(store.resolve(SoundCategory::PageFlip), Some(clip("a")));
    }

    #[test]
    fn empty_custom_pool_falls_back_to_builtin() {
        let mut store = SoundStore::new(builtin_abc());
        store.install_custom(CustomSoundSet::new("sounds"));
        assert_eq!(store.resolve(SoundCategory::PageFlip), Some(clip("a")));
        assert_eq!(store.custom_folder(), Some("sounds"));
    }

    #[test]
    fn random_policy_stays_within_pool() {
        let mut store = SoundStore::new(builtin_abc()).with_policy(SelectionPolicy::Random);
        let pool = [clip("a"), clip("b"), clip("c")];
        for _ in 0..20 {
            let picked = store.resolve(SoundCategory::PageFlip).expect("resolves");
            assert!(pool.contains(&picked));
        }
    }

    #[test]
    fn reset_drops_custom_set_and_rewinds() {
        let mut store = SoundStore::new(builtin_abc());
        store.resolve(SoundCategory::PageFlip);
        store.install_custom(CustomSoundSet::new("sounds"));
        store.reset();
        assert!(store.custom().is_none());
        assert_eq!(store.resolve(SoundCategory::PageFlip), Some(clip("a")));
    }
}
