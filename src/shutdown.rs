//! Advisory stop signal shared by the coordinator, workers, and the
//! interim reporter. The deadline timer is the only sender; receivers
//! check at loop boundaries and never abort an in-flight request.
use tokio::sync::broadcast;

pub type ShutdownSender = broadcast::Sender<()>;
pub type ShutdownReceiver = broadcast::Receiver<()>;
