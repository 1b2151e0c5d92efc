fn main() {
    // Emit ESP-IDF link arguments when building for the target. Host
    // builds (tests, fuzzing) skip this entirely.
    #[cfg(feature = "espidf")]
    embuild::espidf::sysenv::output();
}
