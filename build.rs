fn main() {
    // Compile-time config override consumed by `main.rs` via `option_env!`.
    println!("cargo:rerun-if-env-changed=VIBRATION_NODE_CONFIG");

    #[cfg(feature = "espidf")]
    embuild::espidf::sysenv::output();
}
