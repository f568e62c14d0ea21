fn main() {
    xstep_lib::run()
}
