quantity!(KilovoltAmpereHours, f64, "kVAh");
