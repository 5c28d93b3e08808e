//! Background work behind each [`Effect`].
//!
//! Every operation talks to the backend through [`SweepstakeApi`], turns
//! errors into user-facing [`Failure`]s naming what was attempted, and
//! reports back over the action channel with the epoch it was started in.

use crate::api::SweepstakeApi;
use crate::error::Error;
use crate::state::{Action, Effect, Failure, Outcome};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::debug;

type ActionSender = mpsc::UnboundedSender<Action>;

fn describe<T>(result: crate::Result<T>, action: &str) -> Outcome<T> {
    result.map_err(|e: Error| Failure::from_error(&e, action))
}

fn send(tx: &ActionSender, action: Action) {
    // The receiver only goes away on shutdown.
    if tx.send(action).is_err() {
        debug!("action channel closed, dropping result");
    }
}

/// Run `effect` to completion, sending its result actions on `tx`.
pub async fn run(api: Arc<dyn SweepstakeApi>, effect: Effect, tx: ActionSender) {
    match effect {
        Effect::LoadSweepstakes {
            epoch,
            include_closed,
        } => {
            let result = api.list_sweepstakes(include_closed).await;
            send(
                &tx,
                Action::SweepstakesLoaded {
                    epoch,
                    result: describe(result, "load sweepstakes"),
                },
            );
        }
        Effect::LoadSweepstake { epoch, id, request } => {
            let result = describe(
                api.get_sweepstake(&id).await,
                &format!("load sweepstake {id}"),
            );
            let loaded = result.is_ok();
            send(&tx, Action::SweepstakeLoaded { epoch, result });
            if loaded {
                load_history(api.as_ref(), epoch, request, &id, &tx).await;
            }
        }
        Effect::LoadHistory { epoch, id, request } => {
            load_history(api.as_ref(), epoch, request, &id, &tx).await;
        }
        Effect::LookupSweepstake { epoch, id } => {
            let result = api.get_sweepstake(&id).await;
            send(
                &tx,
                Action::LookupCompleted {
                    epoch,
                    result: describe(result, &format!("find sweepstake {id}")),
                },
            );
        }
        Effect::RefreshSweepstake { epoch, id, request } => {
            // Sequential and not transactional: a history failure leaves
            // the refreshed sweepstake in place.
            let result = describe(
                api.refresh_sweepstake(&id).await,
                &format!("refresh sweepstake {id}"),
            );
            let refreshed = result.is_ok();
            send(&tx, Action::SweepstakeRefreshed { epoch, result });
            if refreshed {
                load_history(api.as_ref(), epoch, request, &id, &tx).await;
            }
        }
        Effect::CloseSweepstake { epoch, id } => {
            let result = api.close_sweepstake(&id).await;
            send(
                &tx,
                Action::SweepstakeClosed {
                    epoch,
                    result: describe(result, &format!("close sweepstake {id}")),
                },
            );
        }
        Effect::CreateSweepstake { epoch, request } => {
            let result = api.create_sweepstake(&request).await;
            send(
                &tx,
                Action::SweepstakeCreated {
                    epoch,
                    result: describe(result, &format!("create sweepstake {}", request.name)),
                },
            );
        }
        Effect::LoadEventTypes { epoch } => {
            let result = api.get_event_types().await;
            send(
                &tx,
                Action::EventTypesLoaded {
                    epoch,
                    result: describe(result, "load event types"),
                },
            );
        }
        Effect::LoadMarkets { epoch, event_type } => {
            let result = describe(
                api.get_markets(&event_type).await,
                &format!("load markets for event type {event_type}"),
            );
            send(
                &tx,
                Action::MarketsLoaded {
                    epoch,
                    event_type,
                    result,
                },
            );
        }
    }
}

async fn load_history(
    api: &dyn SweepstakeApi,
    epoch: u64,
    request: u64,
    id: &str,
    tx: &ActionSender,
) {
    let result = api.get_sweepstake_history(id).await;
    send(
        tx,
        Action::HistoryLoaded {
            epoch,
            request,
            result: describe(result, &format!("load history of sweepstake {id}")),
        },
    );
}
