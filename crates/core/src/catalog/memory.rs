/// Pictures used by the working-memory game, recalled by index.
pub const MEMORY_ITEMS: [&str; 10] = ["🍎", "🚗", "📚", "⚽", "🎮", "🏀", "🎨", "📱", "🎵", "🌟"];

/// Pitch of each tone button in the listen-and-repeat game (C4, E4, G4, C5).
pub const TONE_FREQUENCIES_HZ: [f32; 4] = [261.63, 329.63, 392.00, 523.25];

/// Symbols scattered between the targets in the sustained-attention grid.
pub const DISTRACTOR_SYMBOLS: [&str; 5] = ["⭐", "❤️", "🌙", "☀️", "🌈"];
