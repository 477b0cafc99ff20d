//! Static response catalog
//!
//! Read-only tables shared by every session. They are plain `'static`
//! slices, so there is no runtime mutation path.
//!
//! The crisis resources are emitted verbatim. Any deployment is responsible
//! for keeping the helpline details current.

/// Greeting that opens every transcript, both at start and after a clear.
pub const WELCOME_MESSAGE: &str = "Hi, I'm Haven. I'm here to listen and support you. \
How are you feeling today? (I'm not a crisis service. If you are in danger, \
please contact your local emergency number.)";

/// Lowercase lexical triggers for the crisis protocol.
///
/// Matched as substrings of the case-folded utterance, with no word
/// boundaries. Over-triggering (e.g. "purge" inside a longer word) is accepted
/// in favour of never missing a real signal.
pub const CRISIS_KEYWORDS: &[&str] = &[
    "suicide",
    "suicidal",
    "kill myself",
    "want to die",
    "end my life",
    "end it all",
    "self harm",
    "self-harm",
    "hurt myself",
    "cut myself",
    "overdose",
    "no reason to live",
    "better off dead",
    "starve myself",
    "purge",
];

/// Generic supportive replies for the normal path.
pub const SUPPORT_RESPONSES: &[&str] = &[
    "Thank you for sharing that with me. It takes courage to talk about how you're feeling.",
    "That sounds really hard. Would you like to tell me more about what's been going on?",
    "I hear you. Whatever you're feeling right now is valid.",
    "It's okay to take things one step at a time. What feels most pressing for you today?",
    "You're not alone in this. Many people in recovery go through similar moments.",
    "Let's take a slow breath together. In for four counts, hold for four, out for four.",
    "What has helped you get through difficult moments like this before?",
    "I'm glad you reached out. Being honest about how you feel is an important part of recovery.",
];

/// Opening lines for the crisis protocol.
pub const CRISIS_RESPONSES: &[&str] = &[
    "I'm really concerned about what you've shared, and I'm glad you told me. \
You deserve support from someone who can help right now.",
    "It sounds like you're going through something very painful. Your safety matters, \
and you don't have to face this alone.",
    "Thank you for trusting me with this. What you're feeling is serious, and talking \
to a trained person right now could really help.",
];

/// Helpline resources appended, in this order, to every crisis response.
pub const CRISIS_RESOURCES: &[&str] = &[
    "988 Suicide & Crisis Lifeline: call or text 988 (US)",
    "Crisis Text Line: text HOME to 741741",
    "SAMHSA National Helpline: 1-800-662-4357 (free, confidential, 24/7)",
    "If you are in immediate danger, call 911 or your local emergency number.",
];
