// Purpose: voice instances, voice recipes, and the pool that mixes them
// The trigger side builds voices from specs and inserts them; the audio
// callback renders and reaps them.

pub mod pool;
pub mod spec;
pub mod voice;

pub use pool::VoicePool;
pub use spec::{DescriptorError, SpecError, VoiceSpec, VoiceSpecTable};
pub use voice::Voice;
