//! Byte hashing primitive: plain digests and HMAC over the SHA-2 family

use hashtegrity_core::{Error, Hash, HashAlgorithm, Result};
use hmac::{Hmac, Mac};
use sha2::{Digest, Sha224, Sha256, Sha384, Sha512, Sha512_224, Sha512_256};
use std::fmt;

trait Engine: Send {
    fn update(&mut self, data: &[u8]);
    fn finalize(self: Box<Self>) -> Hash;
}

struct Plain<D>(D);

impl<D: Digest + Send> Engine for Plain<D> {
    fn update(&mut self, data: &[u8]) {
        Digest::update(&mut self.0, data);
    }

    fn finalize(self: Box<Self>) -> Hash {
        self.0.finalize().to_vec()
    }
}

struct Keyed<M>(M);

impl<M: Mac + Send> Engine for Keyed<M> {
    fn update(&mut self, data: &[u8]) {
        Mac::update(&mut self.0, data);
    }

    fn finalize(self: Box<Self>) -> Hash {
        self.0.finalize().into_bytes().to_vec()
    }
}

macro_rules! keyed_engine {
    ($digest:ty, $key:expr) => {
        <Hmac<$digest> as Mac>::new_from_slice($key)
            .map(|mac| Box::new(Keyed(mac)) as Box<dyn Engine>)
            .map_err(|e| Error::configuration(format!("invalid HMAC key: {e}")))
    };
}

fn plain_engine(algorithm: HashAlgorithm) -> Box<dyn Engine> {
    match algorithm {
        HashAlgorithm::Sha224 => Box::new(Plain(Sha224::new())),
        HashAlgorithm::Sha256 => Box::new(Plain(Sha256::new())),
        HashAlgorithm::Sha384 => Box::new(Plain(Sha384::new())),
        HashAlgorithm::Sha512 => Box::new(Plain(Sha512::new())),
        HashAlgorithm::Sha512_224 => Box::new(Plain(Sha512_224::new())),
        HashAlgorithm::Sha512_256 => Box::new(Plain(Sha512_256::new())),
    }
}

fn keyed_engine(algorithm: HashAlgorithm, key: &[u8]) -> Result<Box<dyn Engine>> {
    match algorithm {
        HashAlgorithm::Sha224 => keyed_engine!(Sha224, key),
        HashAlgorithm::Sha256 => keyed_engine!(Sha256, key),
        HashAlgorithm::Sha384 => keyed_engine!(Sha384, key),
        HashAlgorithm::Sha512 => keyed_engine!(Sha512, key),
        HashAlgorithm::Sha512_224 => keyed_engine!(Sha512_224, key),
        HashAlgorithm::Sha512_256 => keyed_engine!(Sha512_256, key),
    }
}

/// Incremental hasher, plain or keyed (HMAC)
pub struct Hasher {
    algorithm: HashAlgorithm,
    keyed: bool,
    engine: Box<dyn Engine>,
}

impl Hasher {
    /// Create a plain digest hasher
    pub fn new(algorithm: HashAlgorithm) -> Self {
        Self {
            algorithm,
            keyed: false,
            engine: plain_engine(algorithm),
        }
    }

    /// Create an HMAC hasher keyed with `key`
    pub fn with_key(algorithm: HashAlgorithm, key: &[u8]) -> Result<Self> {
        Ok(Self {
            algorithm,
            keyed: true,
            engine: keyed_engine(algorithm, key)?,
        })
    }

    /// Plain hasher when `key` is `None`, HMAC otherwise
    pub fn for_key(algorithm: HashAlgorithm, key: Option<&[u8]>) -> Result<Self> {
        match key {
            Some(key) => Self::with_key(algorithm, key),
            None => Ok(Self::new(algorithm)),
        }
    }

    /// Algorithm this hasher was created with
    pub fn algorithm(&self) -> HashAlgorithm {
        self.algorithm
    }

    /// Feed more bytes
    pub fn update(&mut self, data: impl AsRef<[u8]>) {
        self.engine.update(data.as_ref());
    }

    /// Consume the hasher and return the raw hash
    pub fn finalize(self) -> Hash {
        self.engine.finalize()
    }

    /// Consume the hasher and return the lowercase hex hash
    pub fn finalize_hex(self) -> String {
        hex::encode(self.finalize())
    }
}

impl fmt::Debug for Hasher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hasher")
            .field("algorithm", &self.algorithm)
            .field("keyed", &self.keyed)
            .finish_non_exhaustive()
    }
}

/// Hash `data` with `algorithm`
pub fn digest(algorithm: HashAlgorithm, data: impl AsRef<[u8]>) -> Hash {
    let mut hasher = Hasher::new(algorithm);
    hasher.update(data);
    hasher.finalize()
}

/// HMAC of `data` under `key` with `algorithm`
pub fn keyed_digest(algorithm: HashAlgorithm, key: &[u8], data: impl AsRef<[u8]>) -> Result<Hash> {
    let mut hasher = Hasher::with_key(algorithm, key)?;
    hasher.update(data);
    Ok(hasher.finalize())
}
