//! Per-session storage of the last successful analysis.
//!
//! Each dashboard session owns one slot. A slot is filled when an analysis
//! completes and replaced by the next one; it never expires while the
//! process runs. A session may have at most one analysis in flight.

use chrono::{DateTime, Utc};
use rand::Rng;
use rand_distr::Alphanumeric;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;
use tracing::{debug, error};

use crate::analysis::{AnalyzeRequest, StrategyPayload};

const SESSION_TOKEN_LEN: usize = 32;

#[derive(Clone, PartialEq, Eq, Hash, Serialize, Debug)]
pub struct SessionToken(pub String);

impl SessionToken {
    pub fn generate() -> SessionToken {
        let rng = rand::rng();
        let random_string: String = rng
            .sample_iter(&Alphanumeric)
            .take(SESSION_TOKEN_LEN)
            .map(char::from)
            .collect();
        SessionToken(random_string)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A completed analysis together with the request that produced it.
#[derive(Debug, Clone, Serialize)]
pub struct StoredAnalysis {
    pub request: AnalyzeRequest,
    pub payload: StrategyPayload,
    pub completed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
pub struct AnalysisSession {
    pub last_analysis: Option<StoredAnalysis>,
    pub in_flight: bool,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("An analysis is already running for this session")]
    AlreadyInFlight,

    #[error("Session store lock poisoned")]
    Poisoned,
}

/// In-memory map from session token to its analysis slot.
#[derive(Default)]
pub struct SessionStore {
    sessions: Mutex<HashMap<SessionToken, AnalysisSession>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts an analysis and returns a guard that clears the in-flight flag
    /// when dropped, unless the analysis was completed through it.
    pub fn start(
        self: &Arc<Self>,
        token: &SessionToken,
    ) -> Result<InFlightAnalysis, SessionError> {
        self.begin(token)?;
        Ok(InFlightAnalysis {
            store: Arc::clone(self),
            token: token.clone(),
            finished: false,
        })
    }

    /// Marks an analysis as started, creating the session if needed.
    pub fn begin(&self, token: &SessionToken) -> Result<(), SessionError> {
        let mut sessions = self.sessions.lock().map_err(|_| SessionError::Poisoned)?;
        let session = sessions.entry(token.clone()).or_default();
        if session.in_flight {
            return Err(SessionError::AlreadyInFlight);
        }
        session.in_flight = true;
        Ok(())
    }

    /// Stores a successful analysis, replacing the previous one.
    pub fn complete(
        &self,
        token: &SessionToken,
        request: AnalyzeRequest,
        payload: StrategyPayload,
    ) -> Result<StoredAnalysis, SessionError> {
        let mut sessions = self.sessions.lock().map_err(|_| SessionError::Poisoned)?;
        let session = sessions.entry(token.clone()).or_default();
        let stored = StoredAnalysis {
            request,
            payload,
            completed_at: Utc::now(),
        };
        session.last_analysis = Some(stored.clone());
        session.in_flight = false;
        debug!("Stored analysis for session {}", token.as_str());
        Ok(stored)
    }

    /// Clears the in-flight flag after a failed analysis; the previous result is kept.
    /// A session that never completed an analysis is forgotten.
    pub fn abort(&self, token: &SessionToken) -> Result<(), SessionError> {
        let mut sessions = self.sessions.lock().map_err(|_| SessionError::Poisoned)?;
        match sessions.get_mut(token) {
            Some(session) if session.last_analysis.is_some() => session.in_flight = false,
            Some(_) => {
                sessions.remove(token);
            }
            None => {}
        }
        Ok(())
    }

    pub fn last_analysis(
        &self,
        token: &SessionToken,
    ) -> Result<Option<StoredAnalysis>, SessionError> {
        let sessions = self.sessions.lock().map_err(|_| SessionError::Poisoned)?;
        Ok(sessions
            .get(token)
            .and_then(|session| session.last_analysis.clone()))
    }

    pub fn is_in_flight(&self, token: &SessionToken) -> Result<bool, SessionError> {
        let sessions = self.sessions.lock().map_err(|_| SessionError::Poisoned)?;
        Ok(sessions.get(token).map(|s| s.in_flight).unwrap_or(false))
    }

    pub fn len(&self) -> Result<usize, SessionError> {
        let sessions = self.sessions.lock().map_err(|_| SessionError::Poisoned)?;
        Ok(sessions.len())
    }

    pub fn is_empty(&self) -> Result<bool, SessionError> {
        Ok(self.len()? == 0)
    }
}

/// An analysis that holds its session's in-flight flag.
///
/// Dropping it without calling [`InFlightAnalysis::complete`] aborts the
/// analysis, so a cancelled request never leaves its session locked.
pub struct InFlightAnalysis {
    store: Arc<SessionStore>,
    token: SessionToken,
    finished: bool,
}

impl InFlightAnalysis {
    pub fn complete(
        mut self,
        request: AnalyzeRequest,
        payload: StrategyPayload,
    ) -> Result<StoredAnalysis, SessionError> {
        let stored = self.store.complete(&self.token, request, payload)?;
        self.finished = true;
        Ok(stored)
    }
}

impl Drop for InFlightAnalysis {
    fn drop(&mut self) {
        if self.finished {
            return;
        }
        debug!("Analysis for session {} did not complete", self.token.as_str());
        if let Err(err) = self.store.abort(&self.token) {
            error!("Could not clear in-flight analysis: {}", err);
        }
    }
}
