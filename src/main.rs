fn main() {
    location_base_lib::run()
}
