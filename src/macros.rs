macro_rules! see_jvm_spec {
    ($sec:literal) => {
        concat!(
            "See the [JVM Specification §",
            $sec,
            "](https://docs.oracle.com/javase/specs/jvms/se21/html/jvms-4.html#jvms-",
            $sec,
            ") for more information."
        )
    };
    ($sec:literal, $($sub:literal),+) => {
        concat!(
            "See the [JVM Specification §",
            $sec,
            $(".", $sub,)+
            "](https://docs.oracle.com/javase/specs/jvms/se21/html/jvms-4.html#jvms-",
            $sec,
            $(".", $sub,)+
            ") for more information."
        )
    };
}

pub(crate) use see_jvm_spec;
