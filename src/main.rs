fn main() {
    workqueue::app::startup::startup();
}
