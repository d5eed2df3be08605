quantity!(KilowattHours, f64, "kWh");
