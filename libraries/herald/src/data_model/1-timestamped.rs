//! # Timestamped
//! Every logged event carries the session clock reading at which it happened (`elapsed_secs`, seconds since the session started) and its position in the log (`index`).
//! The clock is supplied by the host, so two events can share a timestamp. `index` is what breaks ties.

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Timestamped<E> {
    pub elapsed_secs: f64,
    pub index: usize,
    pub event: E,
}
