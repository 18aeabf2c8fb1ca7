//! Unit tests for the encryption-materials cache
