//! Where frames come from: an in-process session or a daemon session.

use crate::client::DaemonClient;
use anyhow::Result;
use hyperloop_common::{ComparisonChart, DashboardFrame, DashboardQuery, Session, TrackerView};
use uuid::Uuid;

pub enum FrameSource {
    Local(Session),
    Remote {
        client: DaemonClient,
        session_id: Uuid,
    },
}

impl FrameSource {
    pub fn local(seed: Option<u64>) -> Self {
        FrameSource::Local(Session::new(seed))
    }

    /// Open a fresh session on the daemon
    pub async fn remote(base_url: &str) -> Result<Self> {
        let client = DaemonClient::new(base_url)?;
        let session_id = client.create_session().await?;
        Ok(FrameSource::Remote { client, session_id })
    }

    pub fn session_id(&self) -> Uuid {
        match self {
            FrameSource::Local(session) => session.id(),
            FrameSource::Remote { session_id, .. } => *session_id,
        }
    }

    pub fn describe(&self) -> &'static str {
        match self {
            FrameSource::Local(_) => "local",
            FrameSource::Remote { .. } => "daemon",
        }
    }

    /// One interaction cycle
    pub async fn next_frame(&mut self, query: &DashboardQuery) -> Result<DashboardFrame> {
        match self {
            FrameSource::Local(session) => Ok(session.cycle(query)?),
            FrameSource::Remote { client, session_id } => {
                client.dashboard(*session_id, query).await
            }
        }
    }

    /// Tracker table without advancing the simulation
    pub async fn tracker(&mut self, query: &DashboardQuery) -> Result<TrackerView> {
        match self {
            FrameSource::Local(session) => Ok(session.view(query.status_filter, query.sort_key)),
            FrameSource::Remote { client, session_id } => client.pods(*session_id, query).await,
        }
    }

    pub async fn compare(&mut self, pod_a: &str, pod_b: &str) -> Result<ComparisonChart> {
        match self {
            FrameSource::Local(session) => Ok(session.compare(pod_a, pod_b)?),
            FrameSource::Remote { client, session_id } => {
                client.compare(*session_id, pod_a, pod_b).await
            }
        }
    }

    /// End the session; daemon sessions are removed server-side.
    pub async fn close(self) -> Result<()> {
        match self {
            FrameSource::Local(_) => Ok(()),
            FrameSource::Remote { client, session_id } => client.end_session(session_id).await,
        }
    }
}
