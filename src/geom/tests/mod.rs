mod test_extrusion_basic;
mod test_revolve_basic;
mod test_strip_basic;
