mod signal;
mod wav;

pub use signal::{bowed_tone, silence, sine, white_noise};
pub use wav::{read_wav, write_wav};
