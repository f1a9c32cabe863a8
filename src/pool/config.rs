// src/pool/config.rs
//! Configuration for ring pools

/// Configuration for ring pool behavior.
#[derive(Debug, Clone)]
pub struct PoolConfig {
    /// Initial capacity (in slots) of freshly allocated rings
    pub ring_capacity: usize,
    /// Maximum number of idle rings to keep in the pool
    pub max_pool_size: usize,
    /// Number of rings to pre-allocate at startup
    pub min_pool_size: usize,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            ring_capacity: 16,  // enough for a burst of staged records
            max_pool_size: 64,  // keep up to 64 idle rings
            min_pool_size: 8,   // pre-warm with 8
        }
    }
}

impl PoolConfig {
    /// Configuration for low-memory deployments.
    pub fn small() -> Self {
        Self {
            ring_capacity: 4,
            max_pool_size: 16,
            min_pool_size: 2,
        }
    }

    /// Configuration for high-connection-rate servers.
    ///
    /// Rings start large enough that accept bursts rarely trigger growth.
    pub fn large() -> Self {
        Self {
            ring_capacity: 256,
            max_pool_size: 1024,
            min_pool_size: 64,
        }
    }
}
