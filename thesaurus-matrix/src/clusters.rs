//! Top-level clusters
//!
//! One cluster per narrower concept of the root, holding that concept and
//! everything below it. In a DAG a concept can sit in several clusters. The
//! root itself belongs to none.

use smallvec::SmallVec;
use thesaurus_core::{ConceptId, Taxonomy};

#[derive(Clone, Debug)]
pub struct Clusters {
    count: usize,
    /// Cluster numbers per node, indexed by `ConceptId::index()`
    membership: Vec<SmallVec<[u32; 2]>>,
}

impl Clusters {
    pub fn new(t: &Taxonomy) -> Self {
        let mut membership = vec![SmallVec::new(); t.len()];
        let tops = t.top_concepts();
        for (k, &top) in tops.iter().enumerate() {
            for id in t.descendants_or_self(top) {
                let slot: &mut SmallVec<[u32; 2]> = &mut membership[id.index()];
                if !slot.contains(&(k as u32)) {
                    slot.push(k as u32);
                }
            }
        }
        Self {
            count: tops.len(),
            membership,
        }
    }

    /// Number of clusters
    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn clusters_of(&self, id: ConceptId) -> &[u32] {
        self.membership.get(id.index()).map_or(&[], |s| s.as_slice())
    }

    /// True when some cluster holds both concepts
    pub fn shares_cluster(&self, a: ConceptId, b: ConceptId) -> bool {
        let theirs = self.clusters_of(b);
        self.clusters_of(a).iter().any(|k| theirs.contains(k))
    }
}
